use core::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

use subcalc_core::{format_gbp, format_percent};
use subcalc_invoicing::{CalcMethod, CalculationResult, InvoiceInput};

/// Failure while saving a front sheet.
#[derive(Debug, Error)]
pub enum FrontSheetError {
    #[error("failed to write front sheet {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn method_label(method: CalcMethod) -> &'static str {
    match method {
        CalcMethod::Gross => "Gross (retention and discount both on gross)",
        CalcMethod::Sequential => "Sequential (discount on subtotal after retention)",
    }
}

/// Table cells must not break the Markdown row.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Lowercase slug; runs of anything but letters and digits collapse to one dash.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() {
        out.push_str("unnamed");
    }
    out
}

/// First 8 hex digits of SHA-256 over the exact supplier and invoice number.
///
/// Slugs are lossy (`INV/1042` and `INV-1042` share one), so the digest keeps
/// distinct invoices in distinct files.
fn identity_digest(inv: &InvoiceInput) -> String {
    let mut hasher = Sha256::new();
    hasher.update(inv.supplier.as_bytes());
    hasher.update([0u8]);
    hasher.update(inv.invoice_number.as_bytes());
    hex::encode(&hasher.finalize()[..4])
}

/// File name for an invoice's front sheet, e.g.
/// `frontsheet_acme-ltd_inv-1042_1a2b3c4d.md`.
pub fn frontsheet_file_name(inv: &InvoiceInput) -> String {
    format!(
        "frontsheet_{}_{}_{}.md",
        slug(&inv.supplier),
        slug(&inv.invoice_number),
        identity_digest(inv)
    )
}

/// Render the front sheet as Markdown.
///
/// `generated_at` is the only non-input value on the page; pass it in so the
/// output is reproducible.
pub fn render_frontsheet(
    inv: &InvoiceInput,
    res: &CalculationResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut doc = String::new();
    write_sheet(&mut doc, inv, res, generated_at).expect("writing to a String cannot fail");
    doc
}

fn write_sheet(
    doc: &mut String,
    inv: &InvoiceInput,
    res: &CalculationResult,
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    writeln!(doc, "# Subcontractor Payment Front Sheet")?;
    writeln!(doc)?;
    writeln!(doc, "| Field | Value |")?;
    writeln!(doc, "|---|---|")?;
    writeln!(doc, "| Supplier | {} |", cell(&inv.supplier))?;
    writeln!(doc, "| Invoice number | {} |", cell(&inv.invoice_number))?;
    writeln!(doc, "| Invoice date | {} |", inv.invoice_date.format("%Y-%m-%d"))?;
    writeln!(doc, "| Description | {} |", cell(&inv.description))?;
    writeln!(doc, "| Calculation method | {} |", method_label(inv.method))?;
    writeln!(doc, "| Ledger export | {} |", inv.csv_lines)?;
    if let Some(line) = inv.primary_line() {
        if let Some(code) = &line.account_code {
            writeln!(doc, "| Account code | {} |", cell(code))?;
        }
        if let Some(tax) = &line.tax_type {
            writeln!(doc, "| Tax type | {} |", cell(tax))?;
        }
    }
    if let Some(pdf) = &inv.invoice_pdf {
        writeln!(doc, "| Original invoice | {} |", cell(&pdf.display().to_string()))?;
    }

    writeln!(doc)?;
    writeln!(doc, "## Deductions")?;
    writeln!(doc)?;
    writeln!(doc, "| Item | Rate | Amount |")?;
    writeln!(doc, "|---|---:|---:|")?;
    writeln!(doc, "| Gross | | {} |", format_gbp(inv.gross))?;
    writeln!(
        doc,
        "| Retention | {} | {} |",
        format_percent(inv.retention_rate),
        format_gbp(-res.retention())
    )?;
    writeln!(
        doc,
        "| Subtotal after retention | | {} |",
        format_gbp(res.subtotal_after_retention())
    )?;
    writeln!(
        doc,
        "| Discount | {} | {} |",
        format_percent(inv.discount_rate),
        format_gbp(-res.discount())
    )?;
    writeln!(doc, "| **Net payable** | | **{}** |", format_gbp(res.net()))?;

    writeln!(doc)?;
    writeln!(doc, "_Generated {}_", generated_at.format("%Y-%m-%d %H:%M UTC"))
}

/// Render and write the front sheet into `dir`, returning the file's path.
///
/// Creates `dir` if needed; an existing sheet for the same invoice is replaced.
pub fn save_frontsheet(
    inv: &InvoiceInput,
    res: &CalculationResult,
    dir: &Path,
) -> Result<PathBuf, FrontSheetError> {
    let path = dir.join(frontsheet_file_name(inv));
    let io_err = |source: io::Error| FrontSheetError::Io {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_err)?;
    let doc = render_frontsheet(inv, res, Utc::now());
    fs::write(&path, doc).map_err(io_err)?;

    tracing::info!(path = %path.display(), invoice = %inv.invoice_number, "front sheet written");
    Ok(path)
}
