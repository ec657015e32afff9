mod bootstrap;

use anyhow::Result;
use clap::Parser;

use report_core::metrics::METRIC_TABLE;
use report_core::range::ReportRange;
use report_core::settings::{OutputFormat, Settings, SourceCredentials, TableNames};
use report_data::aggregator::usage_type_histogram;
use report_data::assembler::build_report;
use report_data::filter::filter_by_range;
use report_data::source::TableScanner;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("oak-report v{} starting", env!("CARGO_PKG_VERSION"));

    let range = ReportRange::resolve(
        settings.start_date.as_deref(),
        settings.end_date.as_deref(),
    )?;
    tracing::info!("report window: {}", range.label());

    let credentials = SourceCredentials::from_env()?;
    let tables = TableNames::from_env();

    let scanner = TableScanner::connect(&credentials).await;
    let roster = scanner.scan(&tables.accounts).await?;
    let usage_all = scanner.scan(&tables.usage).await?;
    let askai_all = scanner.scan(&tables.askai).await?;

    let (usage, askai) = if settings.no_date_filter {
        tracing::warn!("date filtering disabled; using all rows");
        (usage_all.clone(), askai_all.clone())
    } else {
        (
            filter_by_range(&usage_all, &range),
            filter_by_range(&askai_all, &range),
        )
    };

    if settings.debug {
        tracing::info!("accounts fetched: {}", roster.len());
        tracing::info!(
            "usage rows: {} fetched, {} after filtering",
            usage_all.len(),
            usage.len()
        );
        tracing::info!(
            "ask-AI rows: {} fetched, {} after filtering",
            askai_all.len(),
            askai.len()
        );
        for (usage_type, count) in usage_type_histogram(&usage) {
            tracing::info!("usage_type {:?}: {}", usage_type, count);
        }
    }

    let report = build_report(&roster, &usage, &askai, METRIC_TABLE);
    tracing::info!("report rows: {}", report.rows.len());

    let bytes = match settings.format {
        OutputFormat::Excel => report_export::xlsx::to_xlsx(&report)?,
        OutputFormat::Docx => {
            let logo = bootstrap::load_logo();
            report_export::docx::to_docx(&report, &range, logo.as_deref())?
        }
    };

    let output = bootstrap::resolve_output_path(
        settings.output,
        &range.file_stem(),
        settings.format.extension(),
    );
    std::fs::write(&output, &bytes)?;
    tracing::info!("report written to {}", output.display());

    Ok(())
}
