use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use subcalc_core::{parse_amount, parse_rate, DomainError, DomainResult, ValueObject};

/// Date format accepted for invoice dates (ISO `YYYY-MM-DD`).
pub const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Order of operations used to derive the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMethod {
    /// Retention and discount are both percentages of the original gross.
    #[default]
    Gross,
    /// Discount is taken from the subtotal left after retention.
    Sequential,
}

impl CalcMethod {
    pub const ALL: [CalcMethod; 2] = [CalcMethod::Gross, CalcMethod::Sequential];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalcMethod::Gross => "gross",
            CalcMethod::Sequential => "sequential",
        }
    }
}

impl fmt::Display for CalcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalcMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gross" => Ok(CalcMethod::Gross),
            "sequential" => Ok(CalcMethod::Sequential),
            _ => Err(DomainError::unsupported_method(s)),
        }
    }
}

/// Shape of the rows exported to the accounting ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvLinesMode {
    /// One `Net` row.
    Single,
    /// `Gross`, `Retention` and `Discount` rows.
    #[default]
    Split,
    /// One `Net` row; kept as its own name for importers configured that way.
    NetOnly,
}

impl CsvLinesMode {
    pub const ALL: [CsvLinesMode; 3] = [
        CsvLinesMode::Single,
        CsvLinesMode::Split,
        CsvLinesMode::NetOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CsvLinesMode::Single => "single",
            CsvLinesMode::Split => "split",
            CsvLinesMode::NetOnly => "net-only",
        }
    }
}

impl fmt::Display for CsvLinesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CsvLinesMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CsvLinesMode::Single),
            "split" => Ok(CsvLinesMode::Split),
            "net-only" => Ok(CsvLinesMode::NetOnly),
            _ => Err(DomainError::unsupported_csv_mode(s)),
        }
    }
}

/// Ledger coding for (part of) an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Gross allocation for this line.
    pub amount: Decimal,
    pub account_code: Option<String>,
    pub tax_type: Option<String>,
}

impl ValueObject for LineItem {}

/// A validated subcontractor invoice, ready for the deduction calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceInput {
    pub supplier: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// Amount before deductions. Non-negative when built through [`RawInvoice`].
    pub gross: Decimal,
    pub description: String,
    /// Fraction, e.g. `0.05` for 5%.
    pub retention_rate: Decimal,
    /// Fraction, e.g. `0.025` for 2.5%.
    pub discount_rate: Decimal,
    pub method: CalcMethod,
    pub csv_lines: CsvLinesMode,
    /// Original invoice document, referenced on the front sheet only.
    pub invoice_pdf: Option<PathBuf>,
    pub lines: Vec<LineItem>,
}

impl ValueObject for InvoiceInput {}

impl InvoiceInput {
    /// First line item; its account code and tax type apply to ledger rows.
    pub fn primary_line(&self) -> Option<&LineItem> {
        self.lines.first()
    }

    pub fn account_code(&self) -> &str {
        self.primary_line()
            .and_then(|l| l.account_code.as_deref())
            .unwrap_or("")
    }

    pub fn tax_type(&self) -> &str {
        self.primary_line()
            .and_then(|l| l.tax_type.as_deref())
            .unwrap_or("")
    }
}

/// Invoice fields as typed by a user, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInvoice {
    pub supplier: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub gross: String,
    pub description: String,
    pub retention_rate: String,
    pub discount_rate: String,
    pub method: String,
    pub csv_lines: String,
    pub invoice_pdf: Option<String>,
    pub account_code: Option<String>,
    pub tax_type: Option<String>,
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<RawInvoice> for InvoiceInput {
    type Error = DomainError;

    fn try_from(raw: RawInvoice) -> Result<Self, Self::Error> {
        let supplier = required("supplier", &raw.supplier)?;
        let invoice_number = required("invoice number", &raw.invoice_number)?;

        let invoice_date = NaiveDate::parse_from_str(raw.invoice_date.trim(), INVOICE_DATE_FORMAT)
            .map_err(|_| {
                DomainError::validation(format!(
                    "invoice date {:?} is not a YYYY-MM-DD date",
                    raw.invoice_date
                ))
            })?;

        let gross = parse_amount(&raw.gross)?;
        if gross.is_sign_negative() && !gross.is_zero() {
            return Err(DomainError::validation(format!(
                "gross amount must not be negative (got {gross})"
            )));
        }

        let retention_rate = parse_rate(&raw.retention_rate)?;
        let discount_rate = parse_rate(&raw.discount_rate)?;
        let method: CalcMethod = raw.method.parse()?;
        let csv_lines: CsvLinesMode = raw.csv_lines.parse()?;

        let description = raw.description.trim().to_string();
        let lines = vec![LineItem {
            description: description.clone(),
            amount: gross,
            account_code: optional(raw.account_code),
            tax_type: optional(raw.tax_type),
        }];

        Ok(InvoiceInput {
            supplier,
            invoice_number,
            invoice_date,
            gross,
            description,
            retention_rate,
            discount_rate,
            method,
            csv_lines,
            invoice_pdf: optional(raw.invoice_pdf).map(PathBuf::from),
            lines,
        })
    }
}
