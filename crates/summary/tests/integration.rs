use std::collections::HashMap;
use std::path::PathBuf;

use qualities_summary::load::load_inputs;
use qualities_summary::{
    build_report, Cell, Column, FeedbackSummary, OtherRow, Partition, SelfRow, SummaryConfig,
    SummaryError, Table,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture_summary(config_toml: &str) -> FeedbackSummary {
    let config = SummaryConfig::from_toml(config_toml).unwrap();
    let input = load_inputs(&config, &fixtures_dir()).unwrap();
    FeedbackSummary::from_input(input, config.hierarchy_columns().unwrap()).unwrap()
}

fn fixture_summary() -> FeedbackSummary {
    let toml = std::fs::read_to_string(fixtures_dir().join("summary.toml")).unwrap();
    load_fixture_summary(&toml)
}

fn text(s: &str) -> Cell {
    Cell::Text(s.into())
}

fn qualities(table: &Table) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for cell in table.column_values(Column::Quality) {
        let q = cell.to_string();
        if !out.contains(&q) {
            out.push(q);
        }
    }
    out
}

// -------------------------------------------------------------------------
// Scenario: six self qualities, three reviewers
// -------------------------------------------------------------------------

#[test]
fn scenario_counts() {
    let summary = fixture_summary();
    let counts: HashMap<&str, u16> = summary
        .count_dataframe()
        .iter()
        .map(|c| (c.quality.as_str(), c.count))
        .collect();

    assert_eq!(counts.len(), 5);
    assert_eq!(counts["Abstract thinker"], 2);
    assert_eq!(counts["Independent"], 2);
    assert_eq!(counts["Analytical"], 1);
    assert_eq!(counts["Ambitious"], 1);
    assert_eq!(counts["Committed"], 1);
    assert!(!counts.contains_key("Spontaneous"));
}

#[test]
fn scenario_merged_order() {
    let summary = fixture_summary();
    let merged = summary.merged_dataframe();

    let keys: Vec<(String, String, String)> = (0..merged.len())
        .map(|i| {
            (
                merged.get(i, Column::Quality).unwrap().to_string(),
                merged.get(i, Column::OthersCount).unwrap().to_string(),
                merged.get(i, Column::Reviewer).unwrap().to_string(),
            )
        })
        .collect();

    let expected = [
        ("Abstract thinker", "2", "Anna"),
        ("Abstract thinker", "2", "Ben"),
        ("Independent", "2", "Anna"),
        ("Independent", "2", "Cleo"),
        ("Ambitious", "1", "Cleo"),
        ("Analytical", "1", "Ben"),
        ("Committed", "1", "Ben"),
        ("Spontaneous", "0", ""),
    ];
    let expected: Vec<(String, String, String)> = expected
        .iter()
        .map(|(q, n, r)| (q.to_string(), n.to_string(), r.to_string()))
        .collect();
    assert_eq!(keys, expected);
}

#[test]
fn scenario_partitions() {
    let summary = fixture_summary();

    assert_eq!(
        qualities(&summary.match_dataframe()),
        vec!["Abstract thinker", "Analytical", "Committed"]
    );
    assert_eq!(qualities(&summary.only_me_dataframe()), vec!["Spontaneous"]);
    assert_eq!(qualities(&summary.only_others_dataframe()), vec!["Independent", "Ambitious"]);
}

#[test]
fn merged_has_one_row_per_self_quality_at_least() {
    let summary = fixture_summary();
    let merged = qualities(&summary.merged_dataframe());
    for row in summary.self_rows() {
        assert!(merged.contains(&row.quality), "{} missing from merge", row.quality);
    }
}

#[test]
fn merged_has_no_missing_cells() {
    let summary = fixture_summary();
    let merged = summary.merged_dataframe();
    assert_eq!(merged.columns, Column::ALL.to_vec());
    for row in &merged.rows {
        assert_eq!(row.len(), Column::ALL.len());
        assert!(matches!(row[1], Cell::Count(_)));
    }
}

#[test]
fn partitions_are_disjoint_and_counts_consistent() {
    let summary = fixture_summary();
    let merged = summary.merged_rows();

    for row in merged {
        let hits = Partition::ALL.iter().filter(|p| p.contains(row)).count();
        assert!(hits <= 1, "{row:?} in {hits} partitions");
    }

    for partition in [Partition::Match, Partition::OnlyOthers] {
        let rows: Vec<_> = merged.iter().filter(|r| partition.contains(r)).collect();
        for row in &rows {
            let same = rows.iter().filter(|r| r.quality == row.quality).count();
            assert_eq!(usize::from(row.others_count), same, "{partition}: {}", row.quality);
        }
    }
}

#[test]
fn scenario_collapse_of_match() {
    let summary = fixture_summary();
    let collapsed = summary.remove_redundancies(&summary.match_dataframe());

    assert_eq!(collapsed.len(), 4);
    assert_eq!(
        collapsed.rows[0][..4],
        [
            text("Abstract thinker"),
            Cell::Count(2),
            text("Sketches the whole system before coding"),
            text("Anna"),
        ]
    );
    // Same quality, count and self example as the row above: only the reviewer shows.
    assert_eq!(collapsed.rows[1][..4], [text(""), text(""), text(""), text("Ben")]);
    // New quality resets the grouping, even though the count and reviewer repeat.
    assert_eq!(
        collapsed.rows[3][..4],
        [text("Committed"), Cell::Count(1), text("Stayed through the release weekend"), text("Ben")]
    );
}

#[test]
fn report_from_fixtures() {
    let summary = fixture_summary();
    let report = build_report(&summary, "Team feedback", true);

    assert_eq!(report.counts.qualities, 6);
    assert_eq!(report.counts.reviewers, 3);
    assert_eq!(report.counts.matched, 3);
    assert_eq!(report.counts.only_me, 1);
    assert_eq!(report.counts.only_others, 2);
    assert_eq!(report.meta.config_name, "Team feedback");
}

// -------------------------------------------------------------------------
// Projection + loading options
// -------------------------------------------------------------------------

#[test]
fn hierarchy_controls_projection_order() {
    let toml = r#"
hierarchy = ["Name", "Quality"]

[sheets.self]
file = "self.csv"
[sheets.self.rename]
"Adjective" = "Quality"

[sheets.cleo]
file = "cleo.csv"
"#;
    let summary = load_fixture_summary(toml);
    let merged = summary.merged_dataframe();
    assert_eq!(merged.columns, vec![Column::Reviewer, Column::Quality]);
    assert_eq!(merged.rows[0], vec![text("Cleo"), text("Ambitious")]);
}

#[test]
fn keeping_unchosen_rows_adds_zero_count_fan_out() {
    let toml = r#"
remove_unchosen = false

[sheets.self]
file = "self.csv"
[sheets.self.rename]
"Adjective" = "Quality"

[sheets.ben]
file = "ben.csv"
"#;
    let summary = load_fixture_summary(toml);
    let only_me = summary.only_me_dataframe();
    // Ben left Spontaneous blank; the row is kept and joins with count 0.
    let spontaneous: Vec<usize> = (0..only_me.len())
        .filter(|&i| only_me.get(i, Column::Quality) == Some(&text("Spontaneous")))
        .collect();
    assert_eq!(spontaneous.len(), 1);
    assert_eq!(only_me.get(spontaneous[0], Column::Reviewer), Some(&text("Ben")));
}

// -------------------------------------------------------------------------
// Validation failures
// -------------------------------------------------------------------------

#[test]
fn duplicate_self_fixture_rejected() {
    let toml = r#"
[sheets.self]
file = "duplicate-self.csv"

[sheets.ben]
file = "ben.csv"
"#;
    let config = SummaryConfig::from_toml(toml).unwrap();
    let input = load_inputs(&config, &fixtures_dir()).unwrap();
    let err = FeedbackSummary::from_input(input, Column::ALL.to_vec()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "There are duplicated entries found in the self-assessment: Analytical, Committed"
    );
}

#[test]
fn missing_quality_rejected() {
    let err = FeedbackSummary::new(
        vec![SelfRow::new("Analytical", "x")],
        vec![
            OtherRow::new("Analytical", "y", "Anna"),
            OtherRow::new("Patient", "z", "Anna"),
        ],
        Column::ALL.to_vec(),
    )
    .unwrap_err();
    assert_eq!(err, SummaryError::MissingSelfQuality(vec!["Patient".into()]));
    assert_eq!(err.to_string(), "There is a quality missing from the self-assessment: Patient");
}

#[test]
fn missing_column_in_reviewer_sheet() {
    let toml = r#"
[sheets.self]
file = "self.csv"

[sheets.ben]
file = "ben.csv"
"#;
    // Without the rename, the self sheet has no Quality column.
    let config = SummaryConfig::from_toml(toml).unwrap();
    let err = load_inputs(&config, &fixtures_dir()).unwrap_err();
    assert!(
        matches!(err, SummaryError::MissingColumn { ref column, .. } if column == "Quality"),
        "{err}"
    );
}
