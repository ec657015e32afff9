//! DOCX export: cover block (optional logo, title, date-range caption) plus
//! a grid table of the report rows.

use std::io::Cursor;

use chrono::Utc;
use docx_rs::{AlignmentType, Docx, Paragraph, Pic, Run, Table, TableCell, TableRow};

use report_core::error::{ReportError, Result};
use report_core::models::UsageReport;
use report_core::range::ReportRange;

/// Title shown on the document cover.
const TITLE: &str = "OAK Usage Report";

/// Logo display size in EMU (1.5 inch wide, 914400 EMU per inch).
const LOGO_WIDTH_EMU: u32 = 1_371_600;
const LOGO_HEIGHT_EMU: u32 = 1_371_600;

/// Serialize the report to an in-memory DOCX document.
///
/// The cover carries the covered date range and a generation timestamp;
/// empty cells render as empty strings.
pub fn to_docx(
    report: &UsageReport,
    range: &ReportRange,
    logo_png: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    if let Some(png) = logo_png {
        let pic = Pic::new(png).size(LOGO_WIDTH_EMU, LOGO_HEIGHT_EMU);
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_image(pic))
                .align(AlignmentType::Center),
        );
    }

    docx = docx.add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(TITLE).bold())
            .align(AlignmentType::Center),
    );

    let caption = format!(
        "Date Range: {}    Generated: {}",
        range.label(),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    docx = docx
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(caption))
                .align(AlignmentType::Center),
        )
        .add_paragraph(Paragraph::new());

    docx = docx.add_table(build_table(report));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ReportError::Export(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn build_table(report: &UsageReport) -> Table {
    let header = TableRow::new(
        report
            .columns()
            .iter()
            .map(|name| cell(name, true))
            .collect(),
    );

    let mut rows = Vec::with_capacity(report.rows.len() + 1);
    rows.push(header);
    for row in &report.rows {
        let mut cells = Vec::with_capacity(row.counts.len() + 2);
        cells.push(cell(&row.account, false));
        cells.push(cell(row.username.as_deref().unwrap_or(""), false));
        for count in &row.counts {
            cells.push(cell(&count.to_string(), false));
        }
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
}

fn cell(text: &str, bold: bool) -> TableCell {
    let run = if bold {
        Run::new().add_text(text).bold()
    } else {
        Run::new().add_text(text)
    };
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::models::ReportRow;

    fn sample_report() -> UsageReport {
        UsageReport {
            metric_columns: vec![
                "Generated Transcripts".to_string(),
                "AskAI Questions".to_string(),
            ],
            rows: vec![ReportRow {
                account: "a@x.com".to_string(),
                username: None,
                counts: vec![2, 0],
            }],
        }
    }

    fn sample_range() -> ReportRange {
        ReportRange::resolve(Some("2024-01-01"), Some("2024-01-31")).unwrap()
    }

    #[test]
    fn test_to_docx_produces_zip_container() {
        let bytes = to_docx(&sample_report(), &sample_range(), None).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_to_docx_handles_empty_report() {
        let report = UsageReport {
            metric_columns: vec!["AskAI Questions".to_string()],
            rows: vec![],
        };
        let bytes = to_docx(&report, &sample_range(), None).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_to_docx_does_not_mutate_input() {
        let report = sample_report();
        let before = report.clone();
        to_docx(&report, &sample_range(), None).unwrap();
        assert_eq!(report, before);
    }
}
