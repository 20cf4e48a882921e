//! Shifts all values of a column by an offset, filling the vacated positions
//! with a scalar.
//!
//! `out[i] = input[i - offset]` where the index is in range, else the fill
//! value. A positive offset moves values toward higher indices (leading
//! positions filled); a negative offset moves them toward lower indices
//! (trailing positions filled). Fixed-width types only.

use crate::column::{Column, ColumnView, Scalar};
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::kernels::{assemble_rows, varwidth::RowRef};

/// # Errors
/// * `UnsupportedType` if `input` is not fixed-width.
/// * `TypeMismatch` if the fill value's type differs from the input's.
pub fn shift(
    input: &ColumnView<'_>,
    offset: i64,
    fill: &Scalar,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    if !input.dtype().is_fixed_width() {
        return Err(SlateError::UnsupportedType(input.dtype().to_string()));
    }
    if fill.dtype() != input.dtype() {
        return Err(SlateError::TypeMismatch {
            expected: input.dtype(),
            found: fill.dtype(),
        });
    }

    let n = input.len() as i64;
    let refs: Vec<RowRef<'_>> = (0..n)
        .map(|i| {
            let j = i - offset;
            if (0..n).contains(&j) {
                RowRef::Slot(input, j as usize)
            } else {
                RowRef::Broadcast(fill)
            }
        })
        .collect();

    let attach = input.has_validity() || !fill.is_valid();
    assemble_rows(input.dtype(), &refs, attach, ctx)
}
