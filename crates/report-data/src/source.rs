//! Full-table scans against the upstream DynamoDB store.
//!
//! Each report run reads a frozen copy of the three source tables by
//! paginating `Scan` with the continuation key until the store reports no
//! further pages. Transient faults are handled by the SDK's standard retry
//! policy; exhaustion surfaces as a [`ReportError::Scan`] naming the table.

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use tracing::debug;

use report_core::error::{ReportError, Result};
use report_core::settings::SourceCredentials;

/// Number of automatic attempts the SDK makes per request before a scan
/// fails over to the caller.
const MAX_SCAN_ATTEMPTS: u32 = 10;

// ── TableScanner ──────────────────────────────────────────────────────────────

/// Thin wrapper over the DynamoDB client, configured once per report run.
pub struct TableScanner {
    client: aws_sdk_dynamodb::Client,
}

impl TableScanner {
    /// Build a client from static credentials with the standard retry policy.
    pub async fn connect(creds: &SourceCredentials) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(creds.region.clone()))
            .credentials_provider(Credentials::from_keys(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
            ))
            .retry_config(RetryConfig::standard().with_max_attempts(MAX_SCAN_ATTEMPTS))
            .load()
            .await;

        Self {
            client: aws_sdk_dynamodb::Client::new(&config),
        }
    }

    /// Scan `table` to exhaustion and return its items as JSON records.
    pub async fn scan(&self, table: &str) -> Result<Vec<Value>> {
        let mut records: Vec<Value> = Vec::new();
        let mut start_key = None;

        loop {
            let response = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| ReportError::Scan {
                    table: table.to_string(),
                    message: format!("{}", DisplayErrorContext(&e)),
                })?;

            records.extend(
                response
                    .items
                    .unwrap_or_default()
                    .into_iter()
                    .map(item_to_record),
            );

            start_key = response.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        debug!("scanned {}: {} items", table, records.len());
        Ok(records)
    }
}

// ── Attribute conversion ──────────────────────────────────────────────────────

/// Convert one scanned item into a JSON object record.
fn item_to_record(item: std::collections::HashMap<String, AttributeValue>) -> Value {
    let mut map = Map::with_capacity(item.len());
    for (key, attr) in item {
        map.insert(key, attr_to_value(attr));
    }
    Value::Object(map)
}

/// Convert a DynamoDB attribute to its JSON counterpart.
///
/// Numbers arrive from the wire as strings; they are kept numeric when they
/// parse (integer first, then float) and fall back to the original string
/// otherwise. Binary attributes have no JSON analogue and become null.
fn attr_to_value(attr: AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_value(&n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.into_iter().map(attr_to_value).collect()),
        AttributeValue::M(map) => {
            let mut obj = Map::with_capacity(map.len());
            for (key, value) in map {
                obj.insert(key, attr_to_value(value));
            }
            Value::Object(obj)
        }
        AttributeValue::Ss(set) => Value::Array(set.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_value(n)).collect()),
        _ => Value::Null,
    }
}

fn number_value(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = n.parse::<f64>() {
        if let Some(num) = Number::from_f64(f) {
            return Value::Number(num);
        }
    }
    Value::String(n.to_string())
}
