use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// One or more qualities appear more than once in the self-assessment.
    DuplicateSelfQuality(Vec<String>),
    /// One or more reviewer qualities are absent from the self-assessment.
    MissingSelfQuality(Vec<String>),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing self sheet, empty hierarchy, etc.).
    ConfigValidation(String),
    /// Hierarchy names a column the engine does not produce.
    UnknownColumn(String),
    /// Required column not found in a loaded sheet.
    MissingColumn { sheet: String, column: String },
    /// Requested worksheet does not exist in the workbook.
    TabIndex { sheet: String, index: usize, available: usize },
    /// Workbook could not be opened or decoded.
    Sheet(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl SummaryError {
    /// Whether this error came from the self/others consistency checks.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::DuplicateSelfQuality(_) | Self::MissingSelfQuality(_))
    }
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSelfQuality(qualities) => {
                let lead = if qualities.len() > 1 {
                    "There are duplicated entries"
                } else {
                    "There is a duplicated entry"
                };
                write!(f, "{lead} found in the self-assessment: {}", qualities.join(", "))
            }
            Self::MissingSelfQuality(qualities) => {
                let lead = if qualities.len() > 1 {
                    "There are qualities missing from"
                } else {
                    "There is a quality missing from"
                };
                write!(f, "{lead} the self-assessment: {}", qualities.join(", "))
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownColumn(name) => write!(f, "unknown hierarchy column: '{name}'"),
            Self::MissingColumn { sheet, column } => {
                write!(f, "sheet '{sheet}': missing column '{column}'")
            }
            Self::TabIndex { sheet, index, available } => write!(
                f,
                "Tab index {index} is greater than length of tabs on {sheet}({available})-1"
            ),
            Self::Sheet(msg) => write!(f, "sheet error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for SummaryError {}
