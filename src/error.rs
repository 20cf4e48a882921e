// In: src/error.rs

//! This module defines the single, unified error type for the entire slate library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every precondition failure in the engine is a `SlateError`, raised synchronously
//! before the offending operation produces any output. There is exactly one error
//! family: a violated contract. Allocation failure is part of the same family and
//! is never retried.

use thiserror::Error;

use crate::types::DataType;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SlateError>;

#[derive(Error, Debug)]
pub enum SlateError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    #[error("Length mismatch: expected {expected} rows, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Index {index} out of bounds for {size} rows")]
    IndexOutOfBounds { index: i64, size: usize },

    #[error("Invalid range [{begin}, {end}) for size {size}")]
    InvalidRange {
        begin: usize,
        end: usize,
        size: usize,
    },

    #[error("Slice index list must contain an even number of entries, got {0}")]
    OddIndexCount(usize),

    #[error("Mask column must be Boolean, got {0}")]
    NonBooleanMask(DataType),

    #[error("Gather/scatter map must be a non-nullable integral column: {0}")]
    InvalidMap(String),

    #[error("Target column cannot receive nulls: no validity bitmask present")]
    MissingValidity,

    #[error("Allocation of {0} bytes failed")]
    AllocationFailed(usize),

    // =========================================================================
    // === Low-Level Buffer/Kernel Errors
    // =========================================================================
    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}
