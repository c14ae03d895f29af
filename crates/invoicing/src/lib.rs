//! Invoicing domain module: subcontractor invoice inputs and deductions.
//!
//! This crate contains the retention/discount rules for a subcontractor
//! invoice, implemented purely as deterministic domain logic (no IO, no CLI,
//! no storage).

pub mod deductions;
pub mod invoice;

pub use deductions::{calculate, CalculationResult};
pub use invoice::{CalcMethod, CsvLinesMode, InvoiceInput, LineItem, RawInvoice};
