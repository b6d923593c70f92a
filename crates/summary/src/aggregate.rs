use std::collections::BTreeMap;

use crate::model::{CountRow, OtherRow};

/// Group reviewer rows by quality and count the non-empty comments.
///
/// Qualities where nobody left a comment are omitted; rows come out ordered
/// by quality.
pub fn count_by_quality(rows: &[OtherRow]) -> Vec<CountRow> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();

    for row in rows.iter().filter(|r| !r.comment.is_empty()) {
        *groups.entry(row.quality.as_str()).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|(quality, count)| CountRow {
            quality: quality.to_string(),
            count: u16::try_from(count).unwrap_or(u16::MAX),
        })
        .collect()
}
