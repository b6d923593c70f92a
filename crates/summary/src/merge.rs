use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{CountRow, MergedRow, OtherRow, SelfRow};

/// Left-join self rows with their counts, then with every reviewer response.
///
/// A self quality with N reviewer rows yields N merged rows; one with none
/// yields a single row with empty reviewer fields. The result is sorted by
/// count (descending), quality, then reviewer.
pub fn merge_rows(self_rows: &[SelfRow], counts: &[CountRow], others: &[OtherRow]) -> Vec<MergedRow> {
    let count_index: HashMap<&str, u16> =
        counts.iter().map(|c| (c.quality.as_str(), c.count)).collect();

    let mut others_index: HashMap<&str, Vec<&OtherRow>> = HashMap::new();
    for row in others {
        others_index.entry(row.quality.as_str()).or_default().push(row);
    }

    let mut merged = Vec::with_capacity(self_rows.len().max(others.len()));

    for row in self_rows {
        let others_count = count_index.get(row.quality.as_str()).copied().unwrap_or(0);

        match others_index.get(row.quality.as_str()) {
            Some(responses) => {
                for other in responses {
                    merged.push(MergedRow {
                        quality: row.quality.clone(),
                        others_count,
                        self_comment: row.comment.clone(),
                        reviewer: other.reviewer.clone(),
                        other_comment: other.comment.clone(),
                    });
                }
            }
            None => merged.push(MergedRow {
                quality: row.quality.clone(),
                others_count,
                self_comment: row.comment.clone(),
                reviewer: String::new(),
                other_comment: String::new(),
            }),
        }
    }

    merged.sort_by(compare_merged);
    merged
}

fn compare_merged(a: &MergedRow, b: &MergedRow) -> Ordering {
    b.others_count
        .cmp(&a.others_count)
        .then_with(|| a.quality.cmp(&b.quality))
        .then_with(|| a.reviewer.cmp(&b.reviewer))
}
