use log::info;
use serde::Serialize;

use crate::model::{title_case, MergedRow};

/// How a merged row relates the self-assessment to reviewer feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// Claimed in the self-assessment and confirmed by at least one reviewer.
    Match,
    /// Claimed in the self-assessment, confirmed by nobody.
    OnlyMe,
    /// Confirmed by reviewers but left blank in the self-assessment.
    OnlyOthers,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Match, Partition::OnlyMe, Partition::OnlyOthers];

    pub fn of(row: &MergedRow) -> Option<Partition> {
        match (row.others_count > 0, !row.self_comment.is_empty()) {
            (true, true) => Some(Self::Match),
            (false, true) => Some(Self::OnlyMe),
            (true, false) => Some(Self::OnlyOthers),
            (false, false) => None,
        }
    }

    pub fn contains(&self, row: &MergedRow) -> bool {
        Self::of(row) == Some(*self)
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::OnlyMe => write!(f, "only_me"),
            Self::OnlyOthers => write!(f, "only_others"),
        }
    }
}

/// Rows of `merged` that fall into `partition`, in merged order.
pub fn select(merged: &[MergedRow], partition: Partition) -> Vec<&MergedRow> {
    merged.iter().filter(|r| partition.contains(r)).collect()
}

/// Distinct qualities in `rows`, first-appearance order.
pub fn distinct_qualities<'a>(rows: &[&'a MergedRow]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for row in rows {
        if !out.contains(&row.quality.as_str()) {
            out.push(&row.quality);
        }
    }
    out
}

/// Per-reviewer tally for a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerTally {
    pub reviewer: String,
    /// Rows this reviewer has in the partition.
    pub in_partition: usize,
    /// Rows this reviewer has across the whole merged table.
    pub total: usize,
}

/// Tally each reviewer appearing in `selected` against `merged`.
pub fn reviewer_tallies(selected: &[&MergedRow], merged: &[MergedRow]) -> Vec<ReviewerTally> {
    let mut tallies: Vec<ReviewerTally> = Vec::new();
    for row in selected {
        match tallies.iter_mut().find(|t| t.reviewer == row.reviewer) {
            Some(t) => t.in_partition += 1,
            None => tallies.push(ReviewerTally {
                reviewer: row.reviewer.clone(),
                in_partition: 1,
                total: 0,
            }),
        }
    }
    for tally in &mut tallies {
        tally.total = merged.iter().filter(|r| r.reviewer == tally.reviewer).count();
    }
    tallies
}

/// Emit the observability lines for a selected partition.
pub fn log_partition(partition: Partition, selected: &[&MergedRow], merged: &[MergedRow]) {
    let distinct = distinct_qualities(selected).len();
    match partition {
        Partition::Match => {
            info!("{distinct} matching qualities found");
            for t in reviewer_tallies(selected, merged) {
                info!(
                    "{} had {} (out of {}) matching adjectives with you",
                    title_case(&t.reviewer),
                    t.in_partition,
                    t.total
                );
            }
        }
        Partition::OnlyMe => {
            info!("{distinct} qualities found, which no one confirmed.");
        }
        Partition::OnlyOthers => {
            info!("{distinct} missing qualities found among others' feedbacks.");
            for t in reviewer_tallies(selected, merged) {
                info!(
                    "{} had {} (out of {}) adjectives which you didn't choose.",
                    title_case(&t.reviewer),
                    t.in_partition,
                    t.total
                );
            }
        }
    }
}
