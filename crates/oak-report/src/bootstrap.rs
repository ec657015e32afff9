use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is one of the CLI level names and is mapped to a
/// [`tracing_subscriber::EnvFilter`] directive. Falls back to `"info"` if
/// the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_with_filter(&other.to_lowercase()),
    };
    setup_with_filter(normalised)
}

fn setup_with_filter(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry().with(filter).with(layer).init();
    Ok(())
}

// ── Logo discovery ─────────────────────────────────────────────────────────────

/// Read the optional DOCX cover logo from the working directory.
///
/// Returns `None` when the file is absent or unreadable; the cover simply
/// renders without an image.
pub fn load_logo() -> Option<Vec<u8>> {
    load_logo_from(Path::new("oak_logo.png"))
}

pub fn load_logo_from(path: &Path) -> Option<Vec<u8>> {
    std::fs::read(path).ok()
}

// ── Output path ────────────────────────────────────────────────────────────────

/// Resolve the output path: explicit `--output` wins, otherwise a
/// deterministic name derived from the date range and format.
pub fn resolve_output_path(
    output: Option<PathBuf>,
    file_stem: &str,
    extension: &str,
) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(format!("{file_stem}.{extension}")))
}
