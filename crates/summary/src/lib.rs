//! `qualities-summary`: self vs. reviewer feedback reconciliation.
//!
//! Pure engine crate plus the thin layers that feed it: a TOML config and a
//! loader for exported survey sheets. No CLI dependencies.

pub mod aggregate;
pub mod classify;
pub mod collapse;
pub mod config;
pub mod error;
pub mod load;
pub mod merge;
pub mod model;
pub mod report;
pub mod summary;
pub mod table;
pub mod validate;

pub use classify::Partition;
pub use config::SummaryConfig;
pub use error::SummaryError;
pub use model::{Cell, Column, CountRow, MergedRow, OtherRow, SelfRow, SummaryInput};
pub use report::{build_report, SummaryReport};
pub use summary::FeedbackSummary;
pub use table::Table;
