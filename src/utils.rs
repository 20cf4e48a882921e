//! This module provides a set of shared, low-level utility functions used
//! throughout the slate engine.
//!
//! Its primary responsibilities include:
//! 1.  Providing safe, validated conversions between raw byte slices and typed slices.
//! 2.  Keeping every reinterpretation of memory behind `bytemuck`'s checked casts,
//!     so no other module needs `unsafe` or hand-rolled pointer arithmetic.

use crate::error::{Result, SlateError};

//==================================================================================
// 1. Core Utility Functions
//==================================================================================

/// Safely reinterprets a byte slice as a slice of a primitive element type.
///
/// This function is the primary gateway for converting raw column bytes into a
/// workable, typed slice. It performs the length and alignment checks before
/// creating a zero-copy view of the data.
///
/// # Errors
/// Returns a `SlateError::InternalError` if the byte slice length is not a
/// multiple of `size_of::<T>()` or the slice is misaligned for `T`.
pub fn safe_bytes_to_typed_slice<T>(bytes: &[u8]) -> Result<&[T]>
where
    T: bytemuck::Pod,
{
    bytemuck::try_cast_slice(bytes)
        .map_err(|e| SlateError::InternalError(format!("Failed to cast byte slice: {}", e)))
}

/// Converts a slice of primitive elements into a `Vec<u8>` in native byte order.
///
/// This function performs a memory copy to create a new, owned byte vector.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_bytes_to_typed_slice_success() {
        let original_vec: Vec<i32> = vec![1, -2, 1_000_000];
        let bytes = typed_slice_to_bytes(&original_vec);

        let typed_slice = safe_bytes_to_typed_slice::<i32>(&bytes).unwrap();
        assert_eq!(typed_slice, original_vec.as_slice());
    }

    #[test]
    fn test_safe_bytes_to_typed_slice_mismatch_error() {
        // 5 bytes is not divisible by size_of::<i32>(4) or size_of::<i16>(2).
        let bytes: Vec<u8> = vec![0, 1, 2, 3, 4];

        let result_i32 = safe_bytes_to_typed_slice::<i32>(&bytes);
        assert!(matches!(result_i32, Err(SlateError::InternalError(_))));

        let result_i16 = safe_bytes_to_typed_slice::<i16>(&bytes);
        assert!(matches!(result_i16, Err(SlateError::InternalError(_))));
    }

    #[test]
    fn test_typed_slice_to_bytes_endianness() {
        // Value is 258 = 0x0102 in hex.
        let original_vec: Vec<u16> = vec![258];
        let bytes = typed_slice_to_bytes(&original_vec);

        if cfg!(target_endian = "little") {
            assert_eq!(bytes, vec![0x02, 0x01]);
        } else {
            assert_eq!(bytes, vec![0x01, 0x02]);
        }
    }
}
