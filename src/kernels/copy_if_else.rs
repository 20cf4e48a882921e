//! Conditional selection: each output element comes from the left or right
//! operand depending on a boolean mask.
//!
//! Four operand shapes (column/column, scalar/column, column/scalar and
//! scalar/scalar) are unified over one core with the rule
//! `out[i] = (mask.valid(i) && mask[i]) ? left(i) : right(i)`; a null mask
//! bit selects the right operand.

use crate::column::{Column, ColumnView, Scalar};
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::kernels::{assemble_rows, varwidth::RowRef};
use crate::types::DataType;

#[derive(Clone, Copy)]
enum Operand<'a> {
    Col(&'a ColumnView<'a>),
    Scal(&'a Scalar),
}

impl Operand<'_> {
    fn dtype(&self) -> DataType {
        match self {
            Operand::Col(view) => view.dtype(),
            Operand::Scal(scalar) => scalar.dtype(),
        }
    }

    fn nullable(&self) -> bool {
        match self {
            Operand::Col(view) => view.has_validity(),
            Operand::Scal(scalar) => !scalar.is_valid(),
        }
    }

    fn check_len(&self, mask_len: usize) -> Result<()> {
        if let Operand::Col(view) = self {
            if view.len() != mask_len {
                return Err(SlateError::LengthMismatch {
                    expected: mask_len,
                    found: view.len(),
                });
            }
        }
        Ok(())
    }
}

fn select(
    lhs: Operand<'_>,
    rhs: Operand<'_>,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    if mask.dtype() != DataType::Boolean {
        return Err(SlateError::NonBooleanMask(mask.dtype()));
    }
    if lhs.dtype() != rhs.dtype() {
        return Err(SlateError::TypeMismatch {
            expected: lhs.dtype(),
            found: rhs.dtype(),
        });
    }
    lhs.check_len(mask.len())?;
    rhs.check_len(mask.len())?;

    let flags = mask.values::<u8>()?;
    let refs: Vec<RowRef<'_>> = (0..mask.len())
        .map(|i| {
            let take_left = mask.is_valid(i) && flags[i] != 0;
            match if take_left { lhs } else { rhs } {
                Operand::Col(view) => RowRef::Slot(view, i),
                Operand::Scal(scalar) => RowRef::Broadcast(scalar),
            }
        })
        .collect();

    let attach = lhs.nullable() || rhs.nullable();
    assemble_rows(lhs.dtype(), &refs, attach, ctx)
}

/// `out[i] = mask[i] ? lhs[i] : rhs[i]`.
pub fn copy_if_else(
    lhs: &ColumnView<'_>,
    rhs: &ColumnView<'_>,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    select(Operand::Col(lhs), Operand::Col(rhs), mask, ctx)
}

/// `out[i] = mask[i] ? lhs : rhs[i]`.
pub fn copy_if_else_scalar_left(
    lhs: &Scalar,
    rhs: &ColumnView<'_>,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    select(Operand::Scal(lhs), Operand::Col(rhs), mask, ctx)
}

/// `out[i] = mask[i] ? lhs[i] : rhs`.
pub fn copy_if_else_scalar_right(
    lhs: &ColumnView<'_>,
    rhs: &Scalar,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    select(Operand::Col(lhs), Operand::Scal(rhs), mask, ctx)
}

/// `out[i] = mask[i] ? lhs : rhs`; the output length is the mask length.
pub fn copy_if_else_scalars(
    lhs: &Scalar,
    rhs: &Scalar,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    select(Operand::Scal(lhs), Operand::Scal(rhs), mask, ctx)
}
