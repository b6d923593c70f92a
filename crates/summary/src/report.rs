use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::{distinct_qualities, select, Partition};
use crate::error::SummaryError;
use crate::model::Column;
use crate::summary::FeedbackSummary;
use crate::table::Table;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub hierarchy: Vec<Column>,
    pub collapsed: bool,
}

/// Distinct-quality counts per partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub qualities: usize,
    pub reviewers: usize,
    pub matched: usize,
    pub only_me: usize,
    pub only_others: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub meta: SummaryMeta,
    pub counts: SummaryCounts,
    pub matched: Table,
    pub only_me: Table,
    pub only_others: Table,
}

/// Count distinct qualities in each partition.
pub fn compute_counts(summary: &FeedbackSummary) -> SummaryCounts {
    let merged = summary.merged_rows();
    let distinct = |p: Partition| distinct_qualities(&select(merged, p)).len();

    let reviewers: BTreeSet<&str> = summary
        .other_rows()
        .iter()
        .map(|r| r.reviewer.as_str())
        .collect();

    SummaryCounts {
        qualities: summary.self_rows().len(),
        reviewers: reviewers.len(),
        matched: distinct(Partition::Match),
        only_me: distinct(Partition::OnlyMe),
        only_others: distinct(Partition::OnlyOthers),
    }
}

/// Build the three partition views, collapsed for display when `collapse`.
pub fn build_report(summary: &FeedbackSummary, config_name: &str, collapse: bool) -> SummaryReport {
    let view = |table: Table| {
        if collapse {
            summary.remove_redundancies(&table)
        } else {
            table
        }
    };

    SummaryReport {
        meta: SummaryMeta {
            config_name: config_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            hierarchy: summary.hierarchy().to_vec(),
            collapsed: collapse,
        },
        counts: compute_counts(summary),
        matched: view(summary.match_dataframe()),
        only_me: view(summary.only_me_dataframe()),
        only_others: view(summary.only_others_dataframe()),
    }
}

impl SummaryReport {
    pub fn table(&self, partition: Partition) -> &Table {
        match partition {
            Partition::Match => &self.matched,
            Partition::OnlyMe => &self.only_me,
            Partition::OnlyOthers => &self.only_others,
        }
    }

    /// Write `match.csv`, `only_me.csv` and `only_others.csv` into `dir`.
    pub fn write_csv_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, SummaryError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| SummaryError::Io(format!("cannot create {}: {e}", dir.display())))?;

        let mut written = Vec::with_capacity(Partition::ALL.len());
        for partition in Partition::ALL {
            let path = dir.join(format!("{partition}.csv"));
            self.table(partition).save_csv(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
