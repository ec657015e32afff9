//! Column-level timestamp normalization.
//!
//! The event tables carry `created_at` in whichever encoding the writing
//! service used at the time: epoch seconds, epoch milliseconds, or ISO-8601
//! strings. Normalization decides one encoding for the whole column by
//! strict majority, then coerces every row to a UTC instant, turning
//! per-row failures into `None` without disturbing sibling rows.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::warn;

/// Epoch values above this are interpreted as milliseconds rather than
/// seconds. Changing this changes observable report contents.
pub const EPOCH_MILLIS_THRESHOLD: f64 = 1e12;

/// Convert a column of raw timestamp values into UTC instants.
///
/// * If strictly more than half of the values coerce to a number, the whole
///   column is epoch-based: the maximum numeric value decides between
///   milliseconds (`> 1e12`) and seconds. Rows that failed numeric coercion
///   become `None` with no secondary string-parse attempt.
/// * Otherwise every value is parsed independently as a UTC date/time
///   string; unparseable rows become `None`.
pub fn normalize_instants(values: &[Value]) -> Vec<Option<DateTime<Utc>>> {
    if values.is_empty() {
        return Vec::new();
    }

    let numeric: Vec<Option<f64>> = values.iter().map(coerce_numeric).collect();
    let converted = numeric.iter().flatten().count();

    if converted * 2 > values.len() {
        let max = numeric
            .iter()
            .flatten()
            .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        let millis = max > EPOCH_MILLIS_THRESHOLD;

        numeric
            .into_iter()
            .map(|n| n.and_then(|v| epoch_to_instant(v, millis)))
            .collect()
    } else {
        values.iter().map(parse_instant).collect()
    }
}

// ── Numeric branch ────────────────────────────────────────────────────────────

/// Coerce a raw value to `f64`: JSON numbers directly, strings via parse
/// (handles decimal-typed values serialized as strings). Everything else
/// fails coercion.
fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Convert an epoch value in the decided unit to a UTC instant.
fn epoch_to_instant(value: f64, millis: bool) -> Option<DateTime<Utc>> {
    let ms = if millis { value } else { value * 1000.0 };
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
}

// ── String branch ─────────────────────────────────────────────────────────────

/// Parse a single raw value as a UTC date/time string.
fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    let Value::String(s) = value else { return None };
    parse_instant_str(s)
}

/// Parse an ISO 8601 / RFC 3339 timestamp string into a UTC instant.
///
/// Handles the common `Z`-suffix form, fixed offsets, and a ladder of naive
/// formats interpreted as UTC. Returns `None` for empty or unrecognised
/// strings.
pub fn parse_instant_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00' for RFC 3339 compatibility.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive formats are interpreted as UTC.
    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
    ];

    for fmt in FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    warn!("could not parse timestamp string \"{}\"", s);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Epoch-unit decision ───────────────────────────────────────────────────

    #[test]
    fn test_epoch_seconds_column() {
        let values = vec![json!(1_700_000_000_i64), json!(1_700_000_100_i64)];
        let instants = normalize_instants(&values);
        assert_eq!(
            instants[0],
            Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap())
        );
        assert_eq!(
            instants[1].unwrap() - instants[0].unwrap(),
            chrono::Duration::seconds(100)
        );
    }

    #[test]
    fn test_epoch_milliseconds_column() {
        // Max value exceeds 1e12, so the whole column is milliseconds.
        let values = vec![json!(1_700_000_000_000_i64)];
        let instants = normalize_instants(&values);
        assert_eq!(
            instants[0],
            Some(Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap())
        );
    }

    #[test]
    fn test_threshold_boundary_exactly_1e12_is_seconds() {
        // 1e12 is not strictly greater than the threshold.
        let values = vec![json!(1e12)];
        let instants = normalize_instants(&values);
        // 1e12 seconds is year ~33658; far-future but still a seconds read.
        let expected = DateTime::from_timestamp_millis(1_000_000_000_000_000);
        assert_eq!(instants[0], expected);
    }

    #[test]
    fn test_numeric_strings_count_as_numeric() {
        // Decimal-typed values arrive as strings; they still coerce.
        let values = vec![json!("1700000000"), json!("1700000100")];
        let instants = normalize_instants(&values);
        assert!(instants.iter().all(Option::is_some));
    }

    // ── Majority rule ─────────────────────────────────────────────────────────

    #[test]
    fn test_majority_numeric_no_string_fallback() {
        // Two of three values are numeric: epoch branch wins, and the ISO
        // string becomes None rather than being parsed.
        let values = vec![
            json!(1_700_000_000_i64),
            json!(1_700_000_100_i64),
            json!("2023-11-14T22:13:20Z"),
        ];
        let instants = normalize_instants(&values);
        assert!(instants[0].is_some());
        assert!(instants[1].is_some());
        assert_eq!(instants[2], None);
    }

    #[test]
    fn test_exact_half_numeric_goes_to_string_branch() {
        // 1 of 2 is not strictly more than half.
        let values = vec![json!(1_700_000_000_i64), json!("2023-11-14T22:13:20Z")];
        let instants = normalize_instants(&values);
        // Number fails to parse as a string date; string parses.
        assert_eq!(instants[0], None);
        assert!(instants[1].is_some());
    }

    #[test]
    fn test_string_column_parses_each_row() {
        let values = vec![
            json!("2024-01-15T10:00:00Z"),
            json!("2024-01-15 11:00:00"),
            json!("not-a-date"),
        ];
        let instants = normalize_instants(&values);
        assert_eq!(
            instants[0],
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );
        assert_eq!(
            instants[1],
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap())
        );
        assert_eq!(instants[2], None);
    }

    #[test]
    fn test_empty_column() {
        assert!(normalize_instants(&[]).is_empty());
    }

    #[test]
    fn test_null_rows_become_none() {
        let values = vec![
            json!(1_700_000_000_i64),
            Value::Null,
            json!(1_700_000_100_i64),
        ];
        let instants = normalize_instants(&values);
        assert!(instants[0].is_some());
        assert_eq!(instants[1], None);
        assert!(instants[2].is_some());
    }

    #[test]
    fn test_fractional_epoch_seconds() {
        let values = vec![json!(1_700_000_000.5), json!(1_700_000_001.0)];
        let instants = normalize_instants(&values);
        let delta = instants[1].unwrap() - instants[0].unwrap();
        assert_eq!(delta, chrono::Duration::milliseconds(500));
    }

    // ── parse_instant_str ─────────────────────────────────────────────────────

    #[test]
    fn test_parse_instant_str_with_offset() {
        let dt = parse_instant_str("2024-01-15T12:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_str_date_only() {
        let dt = parse_instant_str("2024-01-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_str_empty() {
        assert!(parse_instant_str("").is_none());
    }
}
