//! Copies a range of elements from one column into another.
//!
//! Two variants with one range contract: the in-place form overwrites a
//! mutable view and therefore exists only for fixed-width types (there is no
//! reallocation path), while the out-of-place form returns a patched copy of
//! the target and may reallocate, which is what variable-width types need.
//! Overlapping source/target regions in the in-place form are a caller
//! obligation and undefined; the engine never validates them.

use crate::column::{Column, ColumnView, MutableColumnView};
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::kernels::{assemble_rows, varwidth::RowRef};
use crate::null_handling::bitmap;

/// Validates `[src_begin, src_end)` against the source length and the
/// implied `[tgt_begin, tgt_begin + n)` against the target length, returning
/// the element count `n`.
fn validate_ranges(
    src_len: usize,
    tgt_len: usize,
    src_begin: usize,
    src_end: usize,
    tgt_begin: usize,
) -> Result<usize> {
    if src_begin > src_end || src_end > src_len {
        return Err(SlateError::InvalidRange {
            begin: src_begin,
            end: src_end,
            size: src_len,
        });
    }
    let n = src_end - src_begin;
    if tgt_begin + n > tgt_len {
        return Err(SlateError::InvalidRange {
            begin: tgt_begin,
            end: tgt_begin + n,
            size: tgt_len,
        });
    }
    Ok(n)
}

/// Overwrites `target[tgt_begin .. tgt_begin + (src_end - src_begin))` with
/// `source[src_begin .. src_end)`, values and validity bits alike, in place.
///
/// # Errors
/// * `UnsupportedType` for variable-width types (no reallocation is possible).
/// * `TypeMismatch` if source and target types differ.
/// * `InvalidRange` for a malformed source or target range.
/// * `MissingValidity` if `source` carries nulls and `target` has no mask.
pub fn copy_range_in_place(
    source: &ColumnView<'_>,
    target: &mut MutableColumnView<'_>,
    src_begin: usize,
    src_end: usize,
    tgt_begin: usize,
) -> Result<()> {
    let width = target
        .dtype()
        .element_width()
        .ok_or_else(|| SlateError::UnsupportedType(target.dtype().to_string()))?;
    if source.dtype() != target.dtype() {
        return Err(SlateError::TypeMismatch {
            expected: target.dtype(),
            found: source.dtype(),
        });
    }
    let n = validate_ranges(source.len(), target.len(), src_begin, src_end, tgt_begin)?;
    if source.null_count() > 0 && !target.has_validity() {
        return Err(SlateError::MissingValidity);
    }

    let src_bytes = &source.data()[src_begin * width..src_end * width];
    target.data_mut()[tgt_begin * width..(tgt_begin + n) * width].copy_from_slice(src_bytes);

    if let Some(dst_mask) = target.validity_mut() {
        match source.validity() {
            Some(src_mask) => bitmap::copy_bits(dst_mask, tgt_begin, src_mask, src_begin, n),
            None => {
                for j in 0..n {
                    dst_mask.set(tgt_begin + j, true);
                }
            }
        }
    }
    Ok(())
}

/// Out-of-place equivalent of [`copy_range_in_place`]: returns a new column
/// equal to `target` except for the patched sub-range. Variable-width types
/// are supported because the copy is free to reallocate.
pub fn copy_range(
    source: &ColumnView<'_>,
    target: &ColumnView<'_>,
    src_begin: usize,
    src_end: usize,
    tgt_begin: usize,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    if source.dtype() != target.dtype() {
        return Err(SlateError::TypeMismatch {
            expected: target.dtype(),
            found: source.dtype(),
        });
    }
    let n = validate_ranges(source.len(), target.len(), src_begin, src_end, tgt_begin)?;

    let refs: Vec<RowRef<'_>> = (0..target.len())
        .map(|i| {
            if i >= tgt_begin && i < tgt_begin + n {
                RowRef::Slot(source, src_begin + (i - tgt_begin))
            } else {
                RowRef::Slot(target, i)
            }
        })
        .collect();
    let attach = target.has_validity() || source.has_validity();
    assemble_rows(target.dtype(), &refs, attach, ctx)
}
