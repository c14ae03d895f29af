//! Retention and discount deductions.
//!
//! Two pipelines, selected by [`CalcMethod`]. Both quantize every intermediate
//! amount with [`round2`] before it is used again, and the order of those
//! roundings is part of the contract: the same inputs may legitimately give a
//! different `net` under each method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use subcalc_core::{round2, DomainError, DomainResult, ValueObject};

use crate::invoice::{CalcMethod, InvoiceInput};

/// Deductions derived from one invoice. Every amount carries exactly two
/// fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationResult {
    retention: Decimal,
    discount: Decimal,
    subtotal_after_retention: Decimal,
    net: Decimal,
}

impl ValueObject for CalculationResult {}

impl CalculationResult {
    pub fn retention(&self) -> Decimal {
        self.retention
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn subtotal_after_retention(&self) -> Decimal {
        self.subtotal_after_retention
    }

    pub fn net(&self) -> Decimal {
        self.net
    }

    /// Retention plus discount.
    pub fn total_deductions(&self) -> Decimal {
        self.retention + self.discount
    }
}

fn mul(a: Decimal, b: Decimal, what: &str) -> DomainResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| DomainError::invariant(format!("{what} amount overflow")))
}

fn sub(a: Decimal, b: Decimal, what: &str) -> DomainResult<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| DomainError::invariant(format!("{what} amount overflow")))
}

/// Compute retention, discount, subtotal and net for an invoice.
///
/// Pure and deterministic. Fails only if exact decimal arithmetic overflows.
pub fn calculate(input: &InvoiceInput) -> DomainResult<CalculationResult> {
    let gross = input.gross;
    let retention = round2(mul(gross, input.retention_rate, "retention")?);

    let result = match input.method {
        CalcMethod::Gross => {
            let discount = round2(mul(gross, input.discount_rate, "discount")?);
            let subtotal_after_retention = round2(sub(gross, retention, "subtotal")?);
            let net = round2(sub(sub(gross, retention, "net")?, discount, "net")?);
            CalculationResult {
                retention,
                discount,
                subtotal_after_retention,
                net,
            }
        }
        CalcMethod::Sequential => {
            let subtotal_after_retention = round2(sub(gross, retention, "subtotal")?);
            let discount = round2(mul(subtotal_after_retention, input.discount_rate, "discount")?);
            let net = round2(sub(subtotal_after_retention, discount, "net")?);
            CalculationResult {
                retention,
                discount,
                subtotal_after_retention,
                net,
            }
        }
    };

    tracing::debug!(
        invoice = %input.invoice_number,
        method = %input.method,
        %gross,
        retention = %result.retention,
        discount = %result.discount,
        net = %result.net,
        "deductions calculated"
    );

    Ok(result)
}
