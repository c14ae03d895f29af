use std::path::PathBuf;

use clap::Parser;

use subcalc_invoicing::RawInvoice;
use subcalc_observability::LogFormat;

/// Default ledger file name inside the output directory.
pub const DEFAULT_CSV_NAME: &str = "xero_import.csv";

/// Default front-sheet folder inside the output directory.
pub const DEFAULT_FRONTSHEET_DIR: &str = "frontsheets";

/// Calculate subcontractor retention and discount; generate front sheet and CSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "subcalc")]
#[command(version, about, args_override_self = true)]
pub struct Cli {
    /// Supplier name.
    #[arg(long)]
    pub supplier: String,

    /// Invoice number.
    #[arg(long)]
    pub invoice: String,

    /// Invoice date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,

    /// Gross amount.
    #[arg(long, allow_hyphen_values = true)]
    pub gross: String,

    /// Line description.
    #[arg(long)]
    pub desc: String,

    /// Retention rate (e.g., 5, 5% or 0.05).
    #[arg(long, default_value = "0.05")]
    pub retention_rate: String,

    /// Discount rate (e.g., 2.5, 2.5% or 0.025).
    #[arg(long, default_value = "0.025")]
    pub discount_rate: String,

    /// Calculation method: gross or sequential.
    #[arg(long, default_value = "gross")]
    pub method: String,

    /// CSV output mode: single, split or net-only.
    #[arg(long, default_value = "split")]
    pub csv_lines: String,

    /// Ledger account code for the invoice line.
    #[arg(long)]
    pub account_code: Option<String>,

    /// Ledger tax type for the invoice line.
    #[arg(long)]
    pub tax_type: Option<String>,

    /// Path to original invoice PDF (optional, for reference only).
    #[arg(long)]
    pub invoice_pdf: Option<String>,

    /// Base output directory.
    #[arg(long, env = "SUBCALC_OUT_DIR", default_value = "output")]
    pub out_dir: PathBuf,

    /// Override front-sheet folder (default: <out-dir>/frontsheets).
    #[arg(long, env = "SUBCALC_FRONTSHEET_DIR")]
    pub frontsheet_dir: Option<PathBuf>,

    /// Override CSV path (default: <out-dir>/xero_import.csv).
    #[arg(long, env = "SUBCALC_CSV_PATH")]
    pub csv_path: Option<PathBuf>,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Calculate and report without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    pub log_json: bool,
}

/// How the run report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output locations and switches resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub frontsheet_dir: PathBuf,
    pub csv_path: PathBuf,
    pub output: OutputFormat,
    pub dry_run: bool,
}

impl Cli {
    pub fn raw_invoice(&self) -> RawInvoice {
        RawInvoice {
            supplier: self.supplier.clone(),
            invoice_number: self.invoice.clone(),
            invoice_date: self.date.clone(),
            gross: self.gross.clone(),
            description: self.desc.clone(),
            retention_rate: self.retention_rate.clone(),
            discount_rate: self.discount_rate.clone(),
            method: self.method.clone(),
            csv_lines: self.csv_lines.clone(),
            invoice_pdf: self.invoice_pdf.clone(),
            account_code: self.account_code.clone(),
            tax_type: self.tax_type.clone(),
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            frontsheet_dir: self
                .frontsheet_dir
                .clone()
                .unwrap_or_else(|| self.out_dir.join(DEFAULT_FRONTSHEET_DIR)),
            csv_path: self
                .csv_path
                .clone()
                .unwrap_or_else(|| self.out_dir.join(DEFAULT_CSV_NAME)),
            output: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            dry_run: self.dry_run,
        }
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}
