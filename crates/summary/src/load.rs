//! Read exported survey sheets into self and reviewer rows.

use std::collections::BTreeMap;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use log::{debug, info};

use crate::config::{SheetSource, SummaryConfig, SELF_KEY};
use crate::error::SummaryError;
use crate::model::{
    title_case, OtherRow, SelfRow, SummaryInput, OTHER_INPUT_COMMENT_HEADER, QUALITY_HEADER,
    SELF_INPUT_COMMENT_HEADER,
};

/// A header row plus string cells, as read from one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn rename_headers(&mut self, rename: &BTreeMap<String, String>) {
        for header in &mut self.headers {
            if let Some(to) = rename.get(header.as_str()) {
                *header = to.clone();
            }
        }
    }

    fn column(&self, name: &str) -> Result<usize, SummaryError> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| SummaryError::MissingColumn {
            sheet: self.name.clone(),
            column: name.into(),
        })
    }
}

/// Load one worksheet from a CSV/TSV export or a workbook.
pub fn load_sheet(path: &Path, tab_index: Option<usize>) -> Result<RawSheet, SummaryError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" | "tsv" | "txt" => {
            let index = tab_index.unwrap_or(0);
            if index != 0 {
                return Err(SummaryError::TabIndex {
                    sheet: path.display().to_string(),
                    index,
                    available: 1,
                });
            }
            let data = std::fs::read_to_string(path)
                .map_err(|e| SummaryError::Io(format!("cannot read {}: {e}", path.display())))?;
            let delimiter = if ext == "tsv" { b'\t' } else { b',' };
            read_delimited(&data, delimiter)?
        }
        _ => read_workbook(path, tab_index.unwrap_or(0))?,
    };

    let mut rows = table.into_iter();
    let headers = rows.next().unwrap_or_default();
    let width = headers.len();
    let rows = rows
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .map(|mut r| {
            r.resize(width.max(r.len()), String::new());
            r
        })
        .collect();

    debug!("loaded {} ({} columns)", path.display(), width);

    Ok(RawSheet { name: path.display().to_string(), headers, rows })
}

fn read_delimited(data: &str, delimiter: u8) -> Result<Vec<Vec<String>>, SummaryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
                .map_err(|e| SummaryError::Io(e.to_string()))
        })
        .collect()
}

fn read_workbook(path: &Path, index: usize) -> Result<Vec<Vec<String>>, SummaryError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SummaryError::Sheet(format!("cannot open {}: {e}", path.display())))?;

    let available = workbook.sheet_names().len();
    let range = workbook
        .worksheet_range_at(index)
        .ok_or_else(|| SummaryError::TabIndex {
            sheet: path.display().to_string(),
            index,
            available,
        })?
        .map_err(|e| SummaryError::Sheet(format!("cannot read tab {index} of {}: {e}", path.display())))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>())
        .collect())
}

/// Self-assessment rows from a sheet with `Quality` and `Comment` columns.
pub fn self_rows(sheet: &RawSheet) -> Result<Vec<SelfRow>, SummaryError> {
    let quality = sheet.column(QUALITY_HEADER)?;
    let comment = sheet.column(SELF_INPUT_COMMENT_HEADER)?;

    Ok(sheet
        .rows
        .iter()
        .map(|r| SelfRow::new(r[quality].clone(), r[comment].clone()))
        .collect())
}

/// Reviewer rows from one reviewer's sheet, attributed to `reviewer`.
pub fn other_rows(
    sheet: &RawSheet,
    reviewer: &str,
    remove_unchosen: bool,
) -> Result<Vec<OtherRow>, SummaryError> {
    let quality = sheet.column(QUALITY_HEADER)?;
    let comment = sheet.column(OTHER_INPUT_COMMENT_HEADER)?;

    let rows: Vec<OtherRow> = sheet
        .rows
        .iter()
        .filter(|r| !remove_unchosen || !r[comment].is_empty())
        .map(|r| OtherRow::new(r[quality].clone(), r[comment].clone(), reviewer))
        .collect();

    let chosen = rows.iter().filter(|r| !r.comment.is_empty()).count();
    info!("{reviewer} has chosen {chosen} adjectives.");

    Ok(rows)
}

fn load_source(base_dir: &Path, source: &SheetSource) -> Result<RawSheet, SummaryError> {
    let mut sheet = load_sheet(&base_dir.join(&source.file), source.tab_index)?;
    sheet.rename_headers(&source.rename);
    Ok(sheet)
}

/// Load the self sheet and every reviewer sheet named by `config`.
///
/// Sheet paths are resolved relative to `base_dir`.
pub fn load_inputs(config: &SummaryConfig, base_dir: &Path) -> Result<SummaryInput, SummaryError> {
    let self_source = config.self_sheet().ok_or_else(|| {
        SummaryError::ConfigValidation(format!("'{SELF_KEY}' missing from sheets"))
    })?;
    let self_sheet = load_source(base_dir, self_source)?;
    let self_rows = self_rows(&self_sheet)?;
    info!("Data for own responses loaded from {}.", self_sheet.name);

    let mut other_rows = Vec::new();
    let mut names = Vec::new();
    for (key, source) in config.reviewers() {
        let reviewer = title_case(key);
        debug!("sheet load for {reviewer} initiated");
        let sheet = load_source(base_dir, source)?;
        other_rows.extend(self::other_rows(&sheet, &reviewer, config.remove_unchosen)?);
        names.push(reviewer);
    }
    info!("Other's responses downloaded for {names:?}.");

    Ok(SummaryInput { self_rows, other_rows })
}
