use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{ReportError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Generate the OAK per-account usage report from the event-log tables.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "oak-report",
    about = "Generate the OAK usage report (Excel or DOCX) from DynamoDB tables",
    version
)]
pub struct Settings {
    /// Start date in YYYY-MM-DD (defaults to 30 days before the end date)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date in YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Excel)]
    pub format: OutputFormat,

    /// Output filename (defaults to a name derived from the date range)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log detected columns and row counts
    #[arg(long)]
    pub debug: bool,

    /// Disable date filtering (use all rows) for diagnostics
    #[arg(long)]
    pub no_date_filter: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

// ── OutputFormat ───────────────────────────────────────────────────────────────

/// The two supported report serializations.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// XLSX workbook with a single sheet.
    Excel,
    /// DOCX document with a cover block and grid table.
    Docx,
}

impl OutputFormat {
    /// File extension for the format, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Excel => "xlsx",
            OutputFormat::Docx => "docx",
        }
    }
}

// ── SourceCredentials ──────────────────────────────────────────────────────────

/// Opaque connection parameters for the upstream store, loaded from the
/// environment (a `.env` file is honoured when present).
#[derive(Debug, Clone)]
pub struct SourceCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl SourceCredentials {
    /// Load credentials from `OAK_DYNAMODB_*` environment variables.
    ///
    /// Absence of any variable is a fatal configuration error, never retried.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self {
            access_key_id: require_var("OAK_DYNAMODB_ACCESS_KEY_ID")?,
            secret_access_key: require_var("OAK_DYNAMODB_SECRET_ACCESS_KEY")?,
            region: require_var("OAK_DYNAMODB_REGION")?,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ReportError::Config(format!(
            "missing environment variable {name}"
        ))),
    }
}

// ── TableNames ─────────────────────────────────────────────────────────────────

/// Names of the three source tables. Overridable via `OAK_TABLE_*`
/// environment variables for staging environments.
#[derive(Debug, Clone)]
pub struct TableNames {
    pub accounts: String,
    pub usage: String,
    pub askai: String,
}

impl TableNames {
    pub fn from_env() -> Self {
        Self {
            accounts: var_or("OAK_TABLE_ACCOUNTS", "oak-account-vtc"),
            usage: var_or("OAK_TABLE_USAGE", "oak-usage-log-vtc"),
            askai: var_or("OAK_TABLE_ASKAI", "oak-ask-ai-vtc"),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
