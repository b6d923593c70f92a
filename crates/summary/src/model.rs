use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One self-assessed quality. `quality` is unique within the self table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfRow {
    pub quality: String,
    pub comment: String,
}

impl SelfRow {
    pub fn new(quality: impl Into<String>, comment: impl Into<String>) -> Self {
        Self { quality: quality.into(), comment: comment.into() }
    }
}

/// One (quality, reviewer) response from a reviewer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherRow {
    pub quality: String,
    pub comment: String,
    pub reviewer: String,
}

impl OtherRow {
    pub fn new(
        quality: impl Into<String>,
        comment: impl Into<String>,
        reviewer: impl Into<String>,
    ) -> Self {
        Self { quality: quality.into(), comment: comment.into(), reviewer: reviewer.into() }
    }
}

/// Pre-loaded self and reviewer rows.
#[derive(Debug, Clone, Default)]
pub struct SummaryInput {
    pub self_rows: Vec<SelfRow>,
    pub other_rows: Vec<OtherRow>,
}

// ---------------------------------------------------------------------------
// Derived
// ---------------------------------------------------------------------------

/// Number of reviewers who left a non-empty comment for a quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub quality: String,
    pub count: u16,
}

/// Self row left-joined with its count and one reviewer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub quality: String,
    pub others_count: u16,
    pub self_comment: String,
    pub reviewer: String,
    pub other_comment: String,
}

impl MergedRow {
    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::Quality => Cell::Text(self.quality.clone()),
            Column::OthersCount => Cell::Count(self.others_count),
            Column::SelfComment => Cell::Text(self.self_comment.clone()),
            Column::Reviewer => Cell::Text(self.reviewer.clone()),
            Column::OtherComment => Cell::Text(self.other_comment.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Columns + cells
// ---------------------------------------------------------------------------

/// Header of the quality column in every input sheet.
pub const QUALITY_HEADER: &str = "Quality";
/// Header of the comment column in the self sheet.
pub const SELF_INPUT_COMMENT_HEADER: &str = "Comment";
/// Header of the comment column in reviewer sheets.
pub const OTHER_INPUT_COMMENT_HEADER: &str = "Examples, so I can understand";

/// The columns the engine computes, named by their display headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Quality,
    OthersCount,
    SelfComment,
    Reviewer,
    OtherComment,
}

impl Column {
    /// Canonical order; also the default hierarchy.
    pub const ALL: [Column; 5] = [
        Column::Quality,
        Column::OthersCount,
        Column::SelfComment,
        Column::Reviewer,
        Column::OtherComment,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Self::Quality => QUALITY_HEADER,
            Self::OthersCount => "Others Count",
            Self::SelfComment => "My Examples",
            Self::Reviewer => "Name",
            Self::OtherComment => "Their Examples",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.header())
    }
}

/// A table cell: free text or a reviewer count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(u16),
}

impl Cell {
    pub fn blank() -> Self {
        Cell::Text(String::new())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A "word" starts after any non-alphabetic character, so `mary-jane` becomes
/// `Mary-Jane` and `o'neil` becomes `O'Neil`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for c in input.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
