use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the report legend table.
///
/// Percentages are pre-formatted strings with one decimal (e.g. "12.4%")
/// so the table, the console output and the rendered panel cannot drift
/// apart in rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportRow {
    /// Display label, e.g. "Rosa (Potentiell kontinuitet)".
    pub name: String,
    /// Share of the forest total ("% av Skog").
    pub pct_of_forest: String,
    /// Share of the whole image ("% av Total").
    pub pct_of_total: String,
    /// Summary rows are drawn emphasized and preceded by a rule line.
    #[serde(default)]
    pub emphasis: bool,
}

impl ReportRow {
    pub fn new(name: impl Into<String>, pct_of_forest: String, pct_of_total: String) -> Self {
        Self {
            name: name.into(),
            pct_of_forest,
            pct_of_total,
            emphasis: false,
        }
    }

    pub fn summary(name: impl Into<String>, pct_of_forest: String, pct_of_total: String) -> Self {
        Self {
            name: name.into(),
            pct_of_forest,
            pct_of_total,
            emphasis: true,
        }
    }
}
