//! A single typed value with an independent validity flag.
//!
//! Scalars exist for the operations that broadcast one value to many
//! destination rows (scalar scatter, conditional selection, shift fill).
//! The value is stored as native-order bytes so fixed-width kernels can
//! splat it with the same byte-copy path they use for column elements; a
//! `Utf8` scalar holds its payload bytes.

use crate::error::{Result, SlateError};
use crate::types::DataType;

#[derive(Debug, Clone)]
pub struct Scalar {
    dtype: DataType,
    value: Vec<u8>,
    valid: bool,
}

impl Scalar {
    /// A valid fixed-width scalar.
    ///
    /// # Errors
    /// `BufferMismatch` if `T` does not match the element width of `dtype`,
    /// `UnsupportedType` if `dtype` is variable-width.
    pub fn new<T: bytemuck::Pod>(dtype: DataType, value: T) -> Result<Self> {
        let width = dtype
            .element_width()
            .ok_or_else(|| SlateError::UnsupportedType(dtype.to_string()))?;
        if width != std::mem::size_of::<T>() {
            return Err(SlateError::BufferMismatch(width, std::mem::size_of::<T>()));
        }
        Ok(Self {
            dtype,
            value: bytemuck::bytes_of(&value).to_vec(),
            valid: true,
        })
    }

    /// An invalid (null) scalar of the given type. The value bytes are zeroed
    /// so broadcast paths can still copy them unconditionally.
    pub fn null(dtype: DataType) -> Self {
        Self {
            dtype,
            value: vec![0u8; dtype.element_width().unwrap_or(0)],
            valid: false,
        }
    }

    /// A valid `Boolean` scalar.
    pub fn from_bool(value: bool) -> Self {
        Self {
            dtype: DataType::Boolean,
            value: vec![value as u8],
            valid: true,
        }
    }

    /// A valid `Utf8` scalar.
    pub fn utf8(value: &str) -> Self {
        Self {
            dtype: DataType::Utf8,
            value: value.as_bytes().to_vec(),
            valid: true,
        }
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The native-order value bytes; empty-or-zeroed for a null scalar.
    pub fn value_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Reads the value back as `T`.
    pub fn get<T: bytemuck::Pod>(&self) -> Result<T> {
        if self.value.len() != std::mem::size_of::<T>() {
            return Err(SlateError::BufferMismatch(
                self.value.len(),
                std::mem::size_of::<T>(),
            ));
        }
        Ok(bytemuck::pod_read_unaligned(&self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip() {
        let s = Scalar::new(DataType::Int32, 7i32).unwrap();
        assert!(s.is_valid());
        assert_eq!(s.get::<i32>().unwrap(), 7);
        assert_eq!(s.value_bytes().len(), 4);
    }

    #[test]
    fn test_scalar_width_mismatch() {
        assert!(matches!(
            Scalar::new(DataType::Int16, 7u64),
            Err(SlateError::BufferMismatch(2, 8))
        ));
    }

    #[test]
    fn test_null_scalar_has_zeroed_bytes() {
        let s = Scalar::null(DataType::Float64);
        assert!(!s.is_valid());
        assert_eq!(s.value_bytes(), &[0u8; 8]);
    }

    #[test]
    fn test_utf8_scalar() {
        let s = Scalar::utf8("hi");
        assert_eq!(s.dtype(), DataType::Utf8);
        assert_eq!(s.value_bytes(), b"hi");
    }
}
