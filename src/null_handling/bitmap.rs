// --- IN: src/null_handling/bitmap.rs ---

//! This module contains pure, stateless, and high-performance kernels for handling
//! validity bitmasks. It uses `bitvec` with an LSB-first, byte-backed layout so a
//! mask's backing store is a plain byte run: bit `i` of the mask is bit `i % 8`
//! of byte `i / 8`, which is exactly the layout the packing engine writes into
//! a contiguous block.

use bitvec::prelude::*;

/// Owned validity bitmask, one bit per row. A set bit marks a valid value.
pub type Bitmap = BitVec<u8, Lsb0>;

/// Borrowed view of a validity bitmask range.
pub type BitmapSlice = BitSlice<u8, Lsb0>;

//==================================================================================
// 1. Construction
//==================================================================================

/// Creates a mask of `len` rows, all valid.
pub fn all_valid(len: usize) -> Bitmap {
    BitVec::repeat(true, len)
}

/// Creates a mask from one flag per row.
pub fn from_flags(flags: &[bool]) -> Bitmap {
    flags.iter().copied().collect()
}

/// Creates a mask marking `Some` rows valid and `None` rows null.
pub fn from_options<T>(values: &[Option<T>]) -> Bitmap {
    values.iter().map(|v| v.is_some()).collect()
}

/// Borrows the first `len` bits of a packed byte region as a mask.
pub fn from_packed_bytes(bytes: &[u8], len: usize) -> &BitmapSlice {
    &bytes.view_bits::<Lsb0>()[..len]
}

//==================================================================================
// 2. Bit Kernels
//==================================================================================

/// Number of valid rows in a mask range.
pub fn count_valid(mask: &BitmapSlice) -> usize {
    mask.count_ones()
}

/// Copies `n` bits from `src` starting at `src_begin` into `dst` starting at
/// `dst_begin`. Ranges may sit at arbitrary (non-byte-aligned) bit offsets.
pub fn copy_bits(dst: &mut BitmapSlice, dst_begin: usize, src: &BitmapSlice, src_begin: usize, n: usize) {
    for i in 0..n {
        dst.set(dst_begin + i, src[src_begin + i]);
    }
}

/// Extracts a mask range into freshly packed bytes, bit 0 of the range landing
/// on bit 0 of byte 0. Trailing pad bits of the last byte are zero.
pub fn to_packed_bytes(mask: &BitmapSlice) -> Vec<u8> {
    let mut out = vec![0u8; mask.len().div_ceil(8)];
    for (i, bit) in mask.iter().by_vals().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options_marks_nulls() {
        let mask = from_options(&[Some(10), None, Some(30)]);
        assert_eq!(mask.len(), 3);
        assert!(mask[0]);
        assert!(!mask[1]);
        assert!(mask[2]);
        assert_eq!(count_valid(&mask), 2);
    }

    #[test]
    fn test_copy_bits_unaligned() {
        let src = from_flags(&[true, false, true, true, false, true, false, true, true]);
        let mut dst = all_valid(9);

        // Copy bits [1, 8) of src into dst starting at bit 2.
        copy_bits(&mut dst, 2, &src, 1, 7);

        let expected = [true, true, false, true, true, false, true, false, true];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(dst[i], e, "bit {}", i);
        }
    }

    #[test]
    fn test_packed_bytes_roundtrip() {
        let flags: Vec<bool> = (0..19).map(|i| i % 3 != 0).collect();
        let mask = from_flags(&flags);

        let bytes = to_packed_bytes(&mask);
        assert_eq!(bytes.len(), 3);

        let restored = from_packed_bytes(&bytes, 19);
        assert_eq!(restored, mask.as_bitslice());
    }

    #[test]
    fn test_packed_bytes_from_offset_slice() {
        // Packing a mid-mask range must rebase the bits to offset zero.
        let mask = from_flags(&[false, false, true, false, true, true, false, false, true, true]);
        let bytes = to_packed_bytes(&mask[2..9]);
        assert_eq!(bytes.len(), 1);
        // Range bits: 1,0,1,1,0,0,1 -> LSB-first byte 0b0100_1101.
        assert_eq!(bytes[0], 0b0100_1101);
    }

    #[test]
    fn test_trailing_pad_bits_are_zero() {
        let mask = all_valid(3);
        let bytes = to_packed_bytes(&mask);
        assert_eq!(bytes, vec![0b0000_0111]);
    }
}
