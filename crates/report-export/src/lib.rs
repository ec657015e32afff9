//! Report serialization layer.
//!
//! Turns the assembled [`report_core::models::UsageReport`] into in-memory
//! XLSX or DOCX byte buffers. Both exporters are pure transformations: they
//! never mutate the input table, and identical inputs produce identical
//! structural content (the DOCX generation timestamp aside).

pub mod docx;
pub mod xlsx;

pub use report_core as core;
