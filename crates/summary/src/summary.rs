use std::cell::OnceCell;

use log::{debug, info};

use crate::aggregate::count_by_quality;
use crate::classify::{log_partition, select, Partition};
use crate::collapse;
use crate::error::SummaryError;
use crate::merge::merge_rows;
use crate::model::{Column, CountRow, MergedRow, OtherRow, SelfRow, SummaryInput};
use crate::table::Table;
use crate::validate::{check_duplicates, check_missing};

/// Reconciles a self-assessment against reviewer feedback.
///
/// Inputs are validated on construction. The count aggregation and the merged
/// rows are computed on first access and cached for the life of the value;
/// build a new `FeedbackSummary` to pick up new data. The caches use
/// `OnceCell`, so a summary cannot be shared across threads.
#[derive(Debug)]
pub struct FeedbackSummary {
    self_rows: Vec<SelfRow>,
    other_rows: Vec<OtherRow>,
    hierarchy: Vec<Column>,
    counts: OnceCell<Vec<CountRow>>,
    merged: OnceCell<Vec<MergedRow>>,
}

impl FeedbackSummary {
    /// Validate inputs and build an engine. Repeated hierarchy columns are
    /// kept once, at their first position.
    pub fn new(
        self_rows: Vec<SelfRow>,
        other_rows: Vec<OtherRow>,
        hierarchy: Vec<Column>,
    ) -> Result<Self, SummaryError> {
        check_duplicates(&self_rows)?;
        check_missing(&self_rows, &other_rows)?;

        let mut unique = Vec::with_capacity(hierarchy.len());
        for column in hierarchy {
            if !unique.contains(&column) {
                unique.push(column);
            }
        }

        debug!(
            "summary built from {} self rows and {} reviewer rows",
            self_rows.len(),
            other_rows.len()
        );

        Ok(Self {
            self_rows,
            other_rows,
            hierarchy: unique,
            counts: OnceCell::new(),
            merged: OnceCell::new(),
        })
    }

    pub fn from_input(input: SummaryInput, hierarchy: Vec<Column>) -> Result<Self, SummaryError> {
        Self::new(input.self_rows, input.other_rows, hierarchy)
    }

    pub fn hierarchy(&self) -> &[Column] {
        &self.hierarchy
    }

    pub fn self_rows(&self) -> &[SelfRow] {
        &self.self_rows
    }

    pub fn other_rows(&self) -> &[OtherRow] {
        &self.other_rows
    }

    /// Reviewer counts per quality (non-empty comments only).
    pub fn count_dataframe(&self) -> &[CountRow] {
        self.counts.get_or_init(|| {
            let counts = count_by_quality(&self.other_rows);
            info!("Adjectives counted for reviewers");
            counts
        })
    }

    /// Full merged rows, sorted, before projection onto the hierarchy.
    pub fn merged_rows(&self) -> &[MergedRow] {
        self.merged
            .get_or_init(|| merge_rows(&self.self_rows, self.count_dataframe(), &self.other_rows))
    }

    /// Merged rows projected onto the hierarchy columns.
    pub fn merged_dataframe(&self) -> Table {
        Table::project(&self.hierarchy, self.merged_rows())
    }

    pub fn match_dataframe(&self) -> Table {
        self.partition_dataframe(Partition::Match)
    }

    pub fn only_me_dataframe(&self) -> Table {
        self.partition_dataframe(Partition::OnlyMe)
    }

    pub fn only_others_dataframe(&self) -> Table {
        self.partition_dataframe(Partition::OnlyOthers)
    }

    /// Merged rows of one partition, projected onto the hierarchy.
    pub fn partition_dataframe(&self, partition: Partition) -> Table {
        let merged = self.merged_rows();
        let selected = select(merged, partition);
        log_partition(partition, &selected, merged);
        Table::project(&self.hierarchy, selected)
    }

    /// Collapse repeated leading values of `input` along this summary's hierarchy.
    pub fn remove_redundancies(&self, input: &Table) -> Table {
        collapse::remove_redundancies(input, &self.hierarchy)
    }
}
