//! This module defines the owned byte storage and the allocator seam.
//!
//! Every output buffer the engine produces comes from a caller-supplied,
//! swappable `Allocator`; there is no hidden sharing of buffers across calls
//! beyond explicit views. `Buffer` is the one owning storage type: it is
//! backed by 64-bit words so that any fixed-width element slice carved out of
//! it is correctly aligned for `bytemuck` casts up to 8-byte types.

use crate::error::{Result, SlateError};

//==================================================================================
// 1. Owned Buffer
//==================================================================================

/// An owned, 8-byte-aligned byte buffer with an exact byte length.
///
/// The word backing means a `Buffer` can always be reinterpreted as `&[T]`
/// for any primitive element type at word-multiple offsets. A `Buffer` is
/// produced by an [`Allocator`] and released by dropping it; views into it
/// never own it and never expose a release operation.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    words: Vec<u64>,
    len: usize,
}

impl Buffer {
    /// Creates a zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(8)],
            len,
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = Self::zeroed(bytes.len());
        buf.as_bytes_mut().copy_from_slice(bytes);
        buf
    }

    /// The buffer length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.len]
    }

    /// Mutable view of the buffer contents.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut(&mut self.words)[..self.len]
    }
}

//==================================================================================
// 2. Allocator Seam
//==================================================================================

/// The narrow interface to the storage subsystem.
///
/// The engine asks an allocator for `bytes` and gets an owned [`Buffer`];
/// nothing else. Implementations may pool, align, or delegate to device
/// memory; the engine only relies on `required_alignment()` when it computes
/// packed layouts.
pub trait Allocator: Send + Sync {
    /// Allocates an owned buffer of exactly `bytes` bytes.
    ///
    /// Allocation failure is fatal to the calling operation and surfaced
    /// immediately; the engine never retries.
    fn allocate(&self, bytes: usize) -> Result<Buffer>;

    /// The alignment, in bytes, that packed-layout region offsets must honor.
    fn required_alignment(&self) -> usize {
        64
    }
}

/// The default allocator: plain host memory, zero-initialized.
#[derive(Debug, Default)]
pub struct HostAllocator;

impl Allocator for HostAllocator {
    fn allocate(&self, bytes: usize) -> Result<Buffer> {
        if bytes > isize::MAX as usize {
            return Err(SlateError::AllocationFailed(bytes));
        }
        log::trace!("host allocation: {} bytes", bytes);
        Ok(Buffer::zeroed(bytes))
    }
}

/// Rounds `offset` up to the next multiple of `alignment`.
pub(crate) fn align_up(offset: usize, alignment: usize) -> usize {
    offset.div_ceil(alignment) * alignment
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_buffer_has_exact_len() {
        let buf = Buffer::zeroed(13);
        assert_eq!(buf.len(), 13);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let buf = Buffer::from_bytes(&[1, 2, 3, 4, 5]);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_buffer_is_word_aligned() {
        let buf = Buffer::zeroed(24);
        assert_eq!(buf.as_bytes().as_ptr() as usize % 8, 0);
    }

    #[test]
    fn test_host_allocator() {
        let alloc = HostAllocator;
        let buf = alloc.allocate(100).unwrap();
        assert_eq!(buf.len(), 100);
        assert_eq!(alloc.required_alignment(), 64);
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 64), 0);
        assert_eq!(align_up(1, 64), 64);
        assert_eq!(align_up(64, 64), 64);
        assert_eq!(align_up(65, 64), 128);
    }
}
