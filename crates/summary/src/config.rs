use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SummaryError;
use crate::model::Column;

/// Sheet key holding the self-assessment.
pub const SELF_KEY: &str = "self";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Display headers, in presentation order.
    #[serde(default = "default_hierarchy")]
    pub hierarchy: Vec<String>,
    /// Drop reviewer rows whose comment is empty.
    #[serde(default = "default_true")]
    pub remove_unchosen: bool,
    #[serde(default)]
    pub sheets: BTreeMap<String, SheetSource>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name() -> String {
    "feedback".into()
}

fn default_hierarchy() -> Vec<String> {
    Column::ALL.iter().map(|c| c.header().to_string()).collect()
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

/// One exported spreadsheet: the self-assessment or a single reviewer.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetSource {
    /// Path to a CSV/TSV file or workbook, relative to the config file.
    #[serde(default)]
    pub file: String,
    /// Worksheet to read from a workbook. Defaults to the first one.
    #[serde(default)]
    pub tab_index: Option<usize>,
    /// Header renames applied before column lookup (`from = "to"`).
    #[serde(default)]
    pub rename: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_true")]
    pub collapse: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: None, collapse: true }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl SummaryConfig {
    pub fn from_toml(input: &str) -> Result<Self, SummaryError> {
        let config: SummaryConfig =
            toml::from_str(input).map_err(|e| SummaryError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SummaryError> {
        if !self.sheets.contains_key(SELF_KEY) {
            return Err(SummaryError::ConfigValidation(format!(
                "'{SELF_KEY}' missing from sheets. Having it is prerequisite for evaluating feedback."
            )));
        }

        if self.reviewers().next().is_none() {
            return Err(SummaryError::ConfigValidation(
                "at least one reviewer sheet is required besides 'self'".into(),
            ));
        }

        let without_file: Vec<&str> = self
            .sheets
            .iter()
            .filter(|(_, s)| s.file.trim().is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        if !without_file.is_empty() {
            return Err(SummaryError::ConfigValidation(format!(
                "file is missing from {without_file:?}. It is necessary for loading the data"
            )));
        }

        if self.hierarchy.is_empty() {
            return Err(SummaryError::ConfigValidation("hierarchy must not be empty".into()));
        }

        let columns = self.hierarchy_columns()?;
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(SummaryError::ConfigValidation(format!(
                    "hierarchy lists '{column}' more than once"
                )));
            }
        }

        Ok(())
    }

    /// Hierarchy headers resolved to engine columns.
    pub fn hierarchy_columns(&self) -> Result<Vec<Column>, SummaryError> {
        self.hierarchy
            .iter()
            .map(|h| Column::from_header(h).ok_or_else(|| SummaryError::UnknownColumn(h.clone())))
            .collect()
    }

    pub fn self_sheet(&self) -> Option<&SheetSource> {
        self.sheets.get(SELF_KEY)
    }

    /// Reviewer sheets (every sheet except `self`), ordered by key.
    pub fn reviewers(&self) -> impl Iterator<Item = (&String, &SheetSource)> {
        self.sheets.iter().filter(|(name, _)| name.as_str() != SELF_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"
name = "Spring review"
hierarchy = ["Quality", "Others Count", "Name"]

[sheets.self]
file = "self.csv"
[sheets.self.rename]
"Adjective" = "Quality"

[sheets.anna]
file = "anna.xlsx"
tab_index = 1

[sheets.ben]
file = "ben.csv"

[output]
dir = "out"
collapse = false
"#;

    #[test]
    fn parses_full_config() {
        let config = SummaryConfig::from_toml(BASIC).unwrap();
        assert_eq!(config.name, "Spring review");
        assert!(config.remove_unchosen);
        assert_eq!(
            config.hierarchy_columns().unwrap(),
            vec![Column::Quality, Column::OthersCount, Column::Reviewer]
        );
        let self_sheet = config.self_sheet().unwrap();
        assert_eq!(self_sheet.rename.get("Adjective").map(String::as_str), Some("Quality"));
        let reviewers: Vec<&str> = config.reviewers().map(|(n, _)| n.as_str()).collect();
        assert_eq!(reviewers, vec!["anna", "ben"]);
        assert_eq!(config.sheets["anna"].tab_index, Some(1));
        assert_eq!(config.output.dir.as_deref(), Some("out"));
        assert!(!config.output.collapse);
    }

    #[test]
    fn defaults_apply() {
        let config = SummaryConfig::from_toml(
            r#"
[sheets.self]
file = "self.csv"
[sheets.anna]
file = "anna.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.name, "feedback");
        assert_eq!(config.hierarchy_columns().unwrap(), Column::ALL.to_vec());
        assert!(config.output.collapse);
        assert_eq!(config.output.dir, None);
    }

    #[test]
    fn missing_self_sheet() {
        let err = SummaryConfig::from_toml("[sheets.anna]\nfile = \"a.csv\"\n").unwrap_err();
        assert!(err.to_string().contains("'self' missing from sheets"), "{err}");
    }

    #[test]
    fn missing_reviewers() {
        let err = SummaryConfig::from_toml("[sheets.self]\nfile = \"s.csv\"\n").unwrap_err();
        assert!(matches!(err, SummaryError::ConfigValidation(_)));
    }

    #[test]
    fn missing_file() {
        let err = SummaryConfig::from_toml(
            "[sheets.self]\nfile = \"s.csv\"\n[sheets.anna]\ntab_index = 0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("file is missing from [\"anna\"]"), "{err}");
    }

    #[test]
    fn unknown_hierarchy_column() {
        let err = SummaryConfig::from_toml(
            "hierarchy = [\"Quality\", \"Mood\"]\n[sheets.self]\nfile = \"s.csv\"\n[sheets.anna]\nfile = \"a.csv\"\n",
        )
        .unwrap_err();
        assert_eq!(err, SummaryError::UnknownColumn("Mood".into()));
    }

    #[test]
    fn duplicate_hierarchy_column() {
        let err = SummaryConfig::from_toml(
            "hierarchy = [\"Name\", \"Name\"]\n[sheets.self]\nfile = \"s.csv\"\n[sheets.anna]\nfile = \"a.csv\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn parse_error() {
        let err = SummaryConfig::from_toml("hierarchy = 3").unwrap_err();
        assert!(matches!(err, SummaryError::ConfigParse(_)));
    }
}
