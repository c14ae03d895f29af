use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use subcalc_core::{round2, ValueObject};
use subcalc_invoicing::{CalculationResult, CsvLinesMode, InvoiceInput};

/// Column order of the ledger import file.
pub const CSV_HEADERS: [&str; 8] = [
    "Supplier",
    "InvoiceNumber",
    "InvoiceDate",
    "LineType",
    "Description",
    "Amount",
    "AccountCode",
    "TaxType",
];

const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Failure while writing the ledger file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("ledger file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("ledger CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

/// What a ledger row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    Gross,
    Retention,
    Discount,
    Net,
}

/// One flat row of the ledger import file. Field order matches [`CSV_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LedgerRow {
    pub supplier: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub line_type: LineType,
    pub description: String,
    /// Signed amount with two decimals; deductions are negative.
    pub amount: Decimal,
    pub account_code: String,
    pub tax_type: String,
}

impl ValueObject for LedgerRow {}

/// Map a calculated invoice onto ledger rows according to its `csv_lines` mode.
pub fn build_rows(inv: &InvoiceInput, res: &CalculationResult) -> Vec<LedgerRow> {
    let row = |line_type: LineType, amount: Decimal| LedgerRow {
        supplier: inv.supplier.clone(),
        invoice_number: inv.invoice_number.clone(),
        invoice_date: inv.invoice_date.format(INVOICE_DATE_FORMAT).to_string(),
        line_type,
        description: inv.description.clone(),
        amount: round2(amount),
        account_code: inv.account_code().to_string(),
        tax_type: inv.tax_type().to_string(),
    };

    match inv.csv_lines {
        CsvLinesMode::Single | CsvLinesMode::NetOnly => vec![row(LineType::Net, res.net())],
        CsvLinesMode::Split => vec![
            row(LineType::Gross, inv.gross),
            row(LineType::Retention, -res.retention()),
            row(LineType::Discount, -res.discount()),
        ],
    }
}

/// Append rows to the ledger file at `path`.
///
/// Parent directories are created as needed. The header row is written only
/// when the file is new or empty; existing rows are never rewritten.
pub fn append_rows(rows: &[LedgerRow], path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let needs_header = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    if needs_header {
        writer.write_record(CSV_HEADERS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        rows = rows.len(),
        header_written = needs_header,
        "ledger rows appended"
    );
    Ok(())
}
