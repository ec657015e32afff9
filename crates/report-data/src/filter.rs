//! Date-window filtering of event records.

use serde_json::Value;
use tracing::warn;

use report_core::fields::{resolve_field, CREATED_AT_ALIASES};
use report_core::range::ReportRange;
use report_core::timestamps::normalize_instants;

/// Retain the rows whose normalized instant lies inside `range`.
///
/// The timestamp field is resolved per collection; when no alias matches,
/// every row is treated as out of range and the result is empty rather than
/// an error. Rows whose timestamp fails per-row coercion are excluded the
/// same way.
pub fn filter_by_range(records: &[Value], range: &ReportRange) -> Vec<Value> {
    if records.is_empty() {
        return Vec::new();
    }

    let Some(field) = resolve_field(records, CREATED_AT_ALIASES) else {
        warn!("no recognizable timestamp field; treating all rows as out of range");
        return Vec::new();
    };

    let raw: Vec<Value> = records
        .iter()
        .map(|rec| rec.get(field).cloned().unwrap_or(Value::Null))
        .collect();
    let instants = normalize_instants(&raw);

    records
        .iter()
        .zip(instants)
        .filter(|(_, instant)| instant.is_some_and(|t| range.contains(t)))
        .map(|(rec, _)| rec.clone())
        .collect()
}
