use serde::{Deserialize, Serialize};

/// One denormalized report row for a single surviving roster account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Normalized (trimmed, lowercased) account identity.
    pub account: String,
    /// Display label from the roster, when the roster carries one.
    pub username: Option<String>,
    /// Per-metric counts, aligned with [`UsageReport::metric_columns`].
    pub counts: Vec<u64>,
}

/// The finished report table handed to the exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Metric column names in presentation order, ask-AI counter last.
    pub metric_columns: Vec<String>,
    /// Rows sorted by username (nulls last), then account.
    pub rows: Vec<ReportRow>,
}

impl UsageReport {
    /// Full header row: identity columns followed by the metric columns.
    pub fn columns(&self) -> Vec<&str> {
        let mut cols = vec!["Account", "Username"];
        cols.extend(self.metric_columns.iter().map(String::as_str));
        cols
    }
}
