//! Core domain types for the OAK usage report.
//!
//! Contains the metric table, schema-alias resolution, timestamp
//! normalization, the report data model, the date-range type, and the
//! CLI / environment settings shared by the other crates.

pub mod error;
pub mod fields;
pub mod metrics;
pub mod models;
pub mod range;
pub mod settings;
pub mod timestamps;
