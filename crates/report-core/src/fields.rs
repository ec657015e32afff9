//! Schema-alias resolution for the independently-evolved source tables.
//!
//! Each table stores the same logical fields under different names depending
//! on which era of the schema wrote the row. A logical field is described by
//! a priority-ordered alias list; resolution picks the first alias present
//! anywhere in the collection. Absence is a normal outcome (e.g. a roster
//! without a username column) and is handled by callers, never an error.

use serde_json::Value;

// ── Alias tables ──────────────────────────────────────────────────────────────

/// Accepted names for the account identity field, in priority order.
pub const ACCOUNT_ALIASES: &[&str] = &[
    "account",
    "email",
    "user",
    "user_id",
    "userId",
    "user_email",
    "userEmail",
    "emailAddress",
    "user_email_address",
];

/// Accepted names for the display-name field, in priority order.
pub const USERNAME_ALIASES: &[&str] = &["username", "user_name", "name", "displayName"];

/// Accepted names for the usage-event category field, in priority order.
pub const USAGE_TYPE_ALIASES: &[&str] =
    &["usage_type", "usageType", "type", "action", "event", "event_type"];

/// Accepted names for the event timestamp field, in priority order.
pub const CREATED_AT_ALIASES: &[&str] = &[
    "createdAt",
    "created_at",
    "timestamp",
    "createdOn",
    "created_at_ms",
    "created_at_iso",
];

// ── Resolution ────────────────────────────────────────────────────────────────

/// Find the first alias that exists as a key in any record of `records`.
///
/// Schemas are not guaranteed uniform record-to-record, so presence in a
/// single record is enough to commit to that alias for the whole collection.
pub fn resolve_field<'a>(records: &[Value], aliases: &[&'a str]) -> Option<&'a str> {
    aliases
        .iter()
        .copied()
        .find(|alias| records.iter().any(|rec| rec.get(alias).is_some()))
}

// ── Identity helpers ──────────────────────────────────────────────────────────

/// Normalize a raw account identity: trim surrounding whitespace, lowercase.
///
/// The same normalization is applied to roster rows and event rows so the
/// per-account join lines up regardless of how the identity was entered.
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Render a field value as an identity string.
///
/// Strings pass through; numeric identities (legacy rows stored user ids as
/// numbers) are stringified. Everything else yields `None`.
pub fn value_as_identity(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
