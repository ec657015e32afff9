//! Per-account event counting.
//!
//! Both entry points normalize account identities the same way the
//! assembler normalizes the roster, so counts join cleanly by account key.
//! Output ordering is irrelevant; the consumer joins by key.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::debug;

use report_core::fields::{
    normalize_identity, resolve_field, value_as_identity, ACCOUNT_ALIASES, USAGE_TYPE_ALIASES,
};

/// Count events per account, retaining only events whose usage type is one
/// of `accepted_types`.
///
/// An empty `accepted_types` set, or account/type fields that cannot be
/// resolved, yields an empty map — a data gap, never an error.
pub fn count_by_metric(events: &[Value], accepted_types: &[&str]) -> HashMap<String, u64> {
    if events.is_empty() || accepted_types.is_empty() {
        return HashMap::new();
    }
    let Some(account_field) = resolve_field(events, ACCOUNT_ALIASES) else {
        debug!("no account field resolvable; metric counts empty");
        return HashMap::new();
    };
    let Some(type_field) = resolve_field(events, USAGE_TYPE_ALIASES) else {
        debug!("no usage-type field resolvable; metric counts empty");
        return HashMap::new();
    };

    let mut counts = HashMap::new();
    for event in events {
        let Some(kind) = event.get(type_field).and_then(Value::as_str) else {
            continue;
        };
        if !accepted_types.contains(&kind) {
            continue;
        }
        if let Some(account) = account_of(event, account_field) {
            *counts.entry(account).or_insert(0) += 1;
        }
    }
    counts
}

/// Count every event per account, with no type filter.
///
/// Used for the ask-AI source, where each event counts as one question.
pub fn count_all(events: &[Value]) -> HashMap<String, u64> {
    if events.is_empty() {
        return HashMap::new();
    }
    let Some(account_field) = resolve_field(events, ACCOUNT_ALIASES) else {
        debug!("no account field resolvable; counts empty");
        return HashMap::new();
    };

    let mut counts = HashMap::new();
    for event in events {
        if let Some(account) = account_of(event, account_field) {
            *counts.entry(account).or_insert(0) += 1;
        }
    }
    counts
}

/// Value counts of the resolved usage-type column, for diagnostics.
pub fn usage_type_histogram(events: &[Value]) -> BTreeMap<String, u64> {
    let mut histogram = BTreeMap::new();
    let Some(type_field) = resolve_field(events, USAGE_TYPE_ALIASES) else {
        return histogram;
    };
    for event in events {
        if let Some(kind) = event.get(type_field).and_then(Value::as_str) {
            *histogram.entry(kind.to_string()).or_insert(0) += 1;
        }
    }
    histogram
}

fn account_of(event: &Value, field: &str) -> Option<String> {
    event
        .get(field)
        .and_then(value_as_identity)
        .map(|raw| normalize_identity(&raw))
}
