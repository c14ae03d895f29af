//! Value object trait: equality by value, not identity.
//!
//! Every record this workspace passes between layers (invoice inputs, line
//! items, calculation results, ledger rows) is a value object: it carries no
//! identity and is never mutated after construction.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. A `CalculationResult` produced for an invoice is final; a
/// different rate means a different result, not an edited one.
///
/// The trait requires:
/// - **Clone**: values are passed by copy between the calculator and renderers
/// - **PartialEq**: two results with the same amounts are the same result
/// - **Debug**: values show up in logs and test failures
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Deduction {
///     rate: Decimal,
///     amount: Decimal,
/// }
///
/// impl ValueObject for Deduction {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
