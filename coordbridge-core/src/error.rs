//! Errors for the fallible conversion helpers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Expected a slice of {expected} components, got {actual}")]
    SliceLength { expected: usize, actual: usize },

    #[error("Component ({row}, {column}) = {value} does not fit in single precision")]
    NarrowingOverflow { row: usize, column: usize, value: f64 },
}
