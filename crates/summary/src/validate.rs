//! Consistency checks between the self table and reviewer rows.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::SummaryError;
use crate::model::{OtherRow, SelfRow};

/// Fail when a quality appears more than once in the self table.
pub fn check_duplicates(self_rows: &[SelfRow]) -> Result<(), SummaryError> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for row in self_rows {
        *seen.entry(row.quality.as_str()).or_insert(0) += 1;
    }

    let duplicated: Vec<String> = seen
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(q, _)| q.to_string())
        .collect();

    if duplicated.is_empty() {
        Ok(())
    } else {
        Err(SummaryError::DuplicateSelfQuality(duplicated))
    }
}

/// Fail when a reviewer names a quality that is not in the self table.
pub fn check_missing(self_rows: &[SelfRow], other_rows: &[OtherRow]) -> Result<(), SummaryError> {
    let known: HashSet<&str> = self_rows.iter().map(|r| r.quality.as_str()).collect();

    let missing: BTreeSet<&str> = other_rows
        .iter()
        .map(|r| r.quality.as_str())
        .filter(|q| !known.contains(q))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SummaryError::MissingSelfQuality(
            missing.into_iter().map(String::from).collect(),
        ))
    }
}
