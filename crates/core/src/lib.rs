//! `subcalc-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model and exact-decimal money helpers shared by every other crate.

pub mod error;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use money::{
    format_amount, format_gbp, format_percent, parse_amount, parse_rate, round2, MONEY_SCALE,
};
pub use value_object::ValueObject;
