use crate::model::{Cell, Column};
use crate::table::Table;

/// Blank cells that repeat the row above, grouped-report style.
///
/// Columns are visited in `hierarchy` order. A cell is blanked when its
/// original value equals the previous row's original value in that column
/// and every hierarchy column to its left on the same row is already blank.
/// The first row is never touched; hierarchy columns missing from the table
/// are skipped.
pub fn remove_redundancies(input: &Table, hierarchy: &[Column]) -> Table {
    let mut out = input.clone();

    let indices: Vec<usize> = hierarchy
        .iter()
        .filter_map(|&c| input.column_index(c))
        .collect();

    for (pos, &idx) in indices.iter().enumerate() {
        for row in 1..input.rows.len() {
            if input.rows[row][idx] != input.rows[row - 1][idx] {
                continue;
            }
            let lefts_blank = indices[..pos].iter().all(|&left| out.rows[row][left].is_blank());
            if lefts_blank {
                out.rows[row][idx] = Cell::blank();
            }
        }
    }

    out
}
