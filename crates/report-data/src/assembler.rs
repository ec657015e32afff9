//! Joins the account roster with the per-metric aggregates into the final
//! report table.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, warn};

use report_core::fields::{
    normalize_identity, resolve_field, value_as_identity, ACCOUNT_ALIASES, USERNAME_ALIASES,
};
use report_core::metrics::{MetricDef, ASKAI_COLUMN, INTERNAL_DOMAIN_SUFFIX};
use report_core::models::{ReportRow, UsageReport};

use crate::aggregator::{count_all, count_by_metric};

/// Build the denormalized report: one row per surviving roster account, one
/// integer column per metric plus the ask-AI counter.
///
/// Aggregation is roster-driven: accounts with events but no roster entry
/// are dropped silently, and internal-domain accounts never appear even
/// when they have recorded activity. Every metric column is present and
/// zero-filled even when an entire event source is empty or malformed.
pub fn build_report(
    roster: &[Value],
    usage_events: &[Value],
    askai_events: &[Value],
    metrics: &[MetricDef],
) -> UsageReport {
    let metric_columns: Vec<String> = metrics
        .iter()
        .map(|m| m.name.to_string())
        .chain(std::iter::once(ASKAI_COLUMN.to_string()))
        .collect();

    if roster.is_empty() {
        return UsageReport {
            metric_columns,
            rows: Vec::new(),
        };
    }

    let account_field = resolve_field(roster, ACCOUNT_ALIASES);
    let username_field = resolve_field(roster, USERNAME_ALIASES);
    if account_field.is_none() {
        warn!("roster has no resolvable account field; report will be empty");
    }

    // Roster base: normalized identity plus display name, internal accounts
    // excluded. Rows without a resolvable identity cannot form a report row.
    let mut rows: Vec<ReportRow> = roster
        .iter()
        .filter_map(|rec| {
            let raw = account_field.and_then(|f| rec.get(f)).and_then(value_as_identity)?;
            let account = normalize_identity(&raw);
            if account.ends_with(INTERNAL_DOMAIN_SUFFIX) {
                return None;
            }
            let username = username_field
                .and_then(|f| rec.get(f))
                .and_then(value_as_identity);
            Some(ReportRow {
                account,
                username,
                counts: Vec::with_capacity(metrics.len() + 1),
            })
        })
        .collect();

    // Left-join each metric's counts onto the base, zero-filling misses.
    for metric in metrics {
        let counts = count_by_metric(usage_events, metric.usage_types);
        for row in &mut rows {
            row.counts
                .push(counts.get(&row.account).copied().unwrap_or(0));
        }
    }

    let askai_counts = count_all(askai_events);
    for row in &mut rows {
        row.counts
            .push(askai_counts.get(&row.account).copied().unwrap_or(0));
    }

    // Stable presentation order: username ascending with nulls last, account
    // as tie-break; ties preserve roster order.
    rows.sort_by(|a, b| match (&a.username, &b.username) {
        (Some(x), Some(y)) => x.cmp(y).then_with(|| a.account.cmp(&b.account)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.account.cmp(&b.account),
    });

    debug!("assembled report with {} rows", rows.len());
    UsageReport {
        metric_columns,
        rows,
    }
}
