use thiserror::Error;

/// All errors produced by the OAK report generator.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("Invalid date \"{0}\": expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A full-table scan against the upstream store failed after the
    /// client's retry policy was exhausted.
    #[error("Failed to scan table {table}: {message}")]
    Scan { table: String, message: String },

    /// Serialization of the finished report failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Pass-through for any raw I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
