//! Pure, stateless kernels for handling nullability.
//!
//! A nullable value is always an explicit (value, validity-bit) pair: the
//! bitmask lives beside the data buffer and is rearranged in lockstep with
//! it. Nothing in the engine ever encodes "null" as an in-band sentinel.

pub mod bitmap;

pub use bitmap::{Bitmap, BitmapSlice};
