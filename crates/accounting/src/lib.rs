//! Accounting export: maps calculated invoices onto ledger import rows.
//!
//! Row building is pure domain logic; only [`append_rows`] touches
//! the filesystem.

pub mod csv_export;

pub use csv_export::{
    append_rows, build_rows, ExportError, LedgerRow, LineType, CSV_HEADERS,
};
