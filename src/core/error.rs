//! Kernel Errors
//!
//! Every fallible kernel operation reports one of these. Wrapping operators
//! never produce `Overflow`; they absorb it as two's-complement wraparound.

use thiserror::Error;

use super::tables::{TableError, TableKind};

/// Errors raised by fixed-point arithmetic and table lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedError {
    /// Divisor had a zero raw value.
    #[error("division by zero")]
    DivisionByZero,

    /// A checked operator left the 64-bit raw range.
    #[error("arithmetic overflow in {op}")]
    Overflow {
        /// Operator that overflowed.
        op: &'static str,
    },

    /// Lookup tables could not be loaded or are not installed.
    #[error("table load failure: {0}")]
    Table(#[from] TableError),

    /// Polymorphic comparison against something that is not a `Fixed64`.
    #[error("cannot compare Fixed64 with {found}")]
    TypeMismatch {
        /// Type name of the rejected operand.
        found: &'static str,
    },

    /// Domain reduction produced an index the table does not cover.
    ///
    /// Only reachable for negative angles, whose truncating reduction yields
    /// a negative index, or for tables shorter than the canonical size.
    #[error("index {index} outside {table} table")]
    OutsideTable {
        /// Table that was indexed.
        table: TableKind,
        /// Offending index.
        index: i64,
    },
}

/// Result alias for kernel operations.
pub type FixedResult<T> = Result<T, FixedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_converts() {
        let err: FixedError = TableError::NotInstalled.into();
        assert_eq!(err, FixedError::Table(TableError::NotInstalled));
        assert_eq!(err.to_string(), "table load failure: lookup tables not installed");
    }

    #[test]
    fn test_messages() {
        assert_eq!(FixedError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            FixedError::Overflow { op: "mul" }.to_string(),
            "arithmetic overflow in mul"
        );
        assert_eq!(
            FixedError::OutsideTable { table: TableKind::Sin, index: -1 }.to_string(),
            "index -1 outside sin table"
        );
    }
}
