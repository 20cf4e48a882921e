//! This module defines the canonical, type-safe representation of data types
//! used throughout the slate engine.

use std::fmt;

/// The canonical, internal representation of a column's element type.
///
/// This enum replaces fragile string-based type tags, enabling compile-time
/// checks and eliminating an entire class of runtime errors. The engine only
/// ever asks a type two questions: how wide is one element, and is it
/// copyable in place (fixed-width) or does it require a rebuild
/// (variable-width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// One byte per value, `0` = false, non-zero = true.
    Boolean,
    /// Variable-width UTF-8 payload with an `Int32` offsets child.
    Utf8,
}

impl DataType {
    /// Returns the byte width of one element, or `None` for variable-width kinds.
    pub fn element_width(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Boolean => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::Utf8 => None,
        }
    }

    /// Returns `true` if elements of this type can be copied byte-for-byte in place.
    pub fn is_fixed_width(&self) -> bool {
        self.element_width().is_some()
    }

    /// Returns `true` if the data type is a signed or unsigned integer.
    ///
    /// Gather/scatter maps must be integral; `Boolean` is deliberately excluded.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Returns `true` if the data type is a signed integer.
    pub fn is_signed_int(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns `true` if the data type is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

/// Provides the canonical string representation for a `DataType`.
impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract.
        write!(f, "{:?}", self)
    }
}

/// Indicates when an allocation operation creates a validity bitmask, based
/// on whether the input carries one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaskAllocationPolicy {
    /// Do not allocate a validity mask, regardless of input.
    Never,
    /// Allocate a validity mask if the input carries one.
    #[default]
    Retain,
    /// Allocate a validity mask, regardless of input.
    Always,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths() {
        assert_eq!(DataType::Int8.element_width(), Some(1));
        assert_eq!(DataType::UInt16.element_width(), Some(2));
        assert_eq!(DataType::Float32.element_width(), Some(4));
        assert_eq!(DataType::Int64.element_width(), Some(8));
        assert_eq!(DataType::Boolean.element_width(), Some(1));
        assert_eq!(DataType::Utf8.element_width(), None);
    }

    #[test]
    fn test_kind_classification() {
        assert!(DataType::Int32.is_fixed_width());
        assert!(DataType::Boolean.is_fixed_width());
        assert!(!DataType::Utf8.is_fixed_width());

        assert!(DataType::UInt64.is_integral());
        assert!(!DataType::Boolean.is_integral());
        assert!(!DataType::Float64.is_integral());
        assert!(!DataType::Utf8.is_integral());
    }

    #[test]
    fn test_display_matches_debug() {
        assert_eq!(DataType::Int32.to_string(), "Int32");
        assert_eq!(DataType::Utf8.to_string(), "Utf8");
    }
}
