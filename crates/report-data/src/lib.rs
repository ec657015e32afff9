//! Data ingestion and aggregation layer for the OAK usage report.
//!
//! Responsible for scanning the source tables, filtering events to the
//! report window, counting per-account activity, and assembling the final
//! report table.

pub mod aggregator;
pub mod assembler;
pub mod filter;
pub mod source;

pub use report_core as core;
