//! One invocation: parse, calculate, write the front sheet and ledger rows, report.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use subcalc_accounting::{append_rows, build_rows};
use subcalc_core::format_gbp;
use subcalc_frontsheet::save_frontsheet;
use subcalc_invoicing::{calculate, CalcMethod, CalculationResult, CsvLinesMode, InvoiceInput};

use crate::args::{Cli, OutputFormat};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub input: InvoiceInput,
    pub result: CalculationResult,
    /// `None` on a dry run.
    pub frontsheet: Option<PathBuf>,
    /// `None` on a dry run.
    pub csv: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    supplier: &'a str,
    invoice_number: &'a str,
    method: CalcMethod,
    csv_lines: CsvLinesMode,
    gross: Decimal,
    retention: Decimal,
    subtotal_after_retention: Decimal,
    discount: Decimal,
    net: Decimal,
    frontsheet: Option<&'a Path>,
    csv: Option<&'a Path>,
}

impl<'a> From<&'a RunReport> for JsonSummary<'a> {
    fn from(report: &'a RunReport) -> Self {
        Self {
            supplier: &report.input.supplier,
            invoice_number: &report.input.invoice_number,
            method: report.input.method,
            csv_lines: report.input.csv_lines,
            gross: report.input.gross,
            retention: report.result.retention(),
            subtotal_after_retention: report.result.subtotal_after_retention(),
            discount: report.result.discount(),
            net: report.result.net(),
            frontsheet: report.frontsheet.as_deref(),
            csv: report.csv.as_deref(),
        }
    }
}

/// Run the whole pipeline for one invoice and print the report to `out`.
///
/// Nothing is written unless the calculation succeeds.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<RunReport> {
    let config = cli.run_config();

    let input = InvoiceInput::try_from(cli.raw_invoice()).context("invalid invoice input")?;
    if let Some(pdf) = &input.invoice_pdf {
        if !pdf.exists() {
            tracing::warn!(path = %pdf.display(), "referenced invoice PDF does not exist");
        }
    }

    let result = calculate(&input).context("deduction calculation failed")?;

    let (frontsheet, csv) = if config.dry_run {
        tracing::info!(invoice = %input.invoice_number, "dry run; no files written");
        (None, None)
    } else {
        let fs_path = save_frontsheet(&input, &result, &config.frontsheet_dir)?;

        let rows = build_rows(&input, &result);
        append_rows(&rows, &config.csv_path)
            .with_context(|| format!("failed to update {}", config.csv_path.display()))?;

        (Some(fs_path), Some(config.csv_path.clone()))
    };

    let report = RunReport {
        input,
        result,
        frontsheet,
        csv,
    };

    match config.output {
        OutputFormat::Text => write_text(&report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonSummary::from(&report))
                .context("failed to encode JSON summary")?;
            writeln!(out)?;
        }
    }

    Ok(report)
}

fn write_text(report: &RunReport, out: &mut impl Write) -> Result<()> {
    match (&report.frontsheet, &report.csv) {
        (Some(fs_path), Some(csv_path)) => {
            writeln!(out, "Front sheet: {}", fs_path.display())?;
            writeln!(out, "CSV updated: {}", csv_path.display())?;
        }
        _ => writeln!(out, "Dry run: no files written")?,
    }
    writeln!(out, "Net payable: {}", format_gbp(report.result.net()))?;
    Ok(())
}
