//! This module serves as the public API for the collection of all pure,
//! stateless row-rearrangement and memory-layout operations.
//!
//! It declares all kernel sub-modules and hosts the one shared assembly core
//! that every out-of-place operation funnels through: a column's kind
//! (fixed-width vs. variable-width) selects a strategy once per column,
//! bulk value copy or opaque rebuild, never per element.

use crate::column::Column;
use crate::error::Result;
use crate::exec::ExecContext;
use crate::null_handling::bitmap;
use crate::types::DataType;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Index-based rearrangement.
pub mod gather;
pub mod scatter;

/// Range copy & conditional selection.
pub mod copy_if_else;
pub mod copy_range;
pub mod shift;

/// Zero-copy view construction and the packing engine.
pub mod contiguous_split;
pub mod split;

/// Allocation helpers.
pub mod allocate;

/// The variable-width rebuild seam.
pub mod varwidth;

pub use allocate::{allocate_like, empty_like, empty_like_table};
pub use contiguous_split::{contiguous_split, PackedTable};
pub use copy_if_else::{
    copy_if_else, copy_if_else_scalar_left, copy_if_else_scalar_right, copy_if_else_scalars,
};
pub use copy_range::{copy_range, copy_range_in_place};
pub use gather::gather;
pub use scatter::{
    boolean_mask_scatter, boolean_mask_scatter_scalars, scatter, scatter_scalars,
};
pub use shift::shift;
pub use split::{slice_column, slice_table, split_column, split_table};
pub use varwidth::{RowRef, VariableWidthKernel};

//==================================================================================
// 2. Shared Assembly Core
//==================================================================================

/// Builds one owned output column whose row `i` is `rows[i]`, value and
/// validity bit alike.
///
/// Fixed-width kinds take the bulk byte-copy path on the context queue;
/// variable-width kinds are handed to their registered rebuild kernel. The
/// output carries a validity mask if `attach_mask` is set (the operation
/// determined an operand is nullable) or any selected row is invalid.
pub(crate) fn assemble_rows(
    dtype: DataType,
    rows: &[varwidth::RowRef<'_>],
    attach_mask: bool,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    if let Some(width) = dtype.element_width() {
        let mut data = ctx.allocator.allocate(rows.len() * width)?;
        let mut mask = bitmap::all_valid(rows.len());
        let mut saw_null = false;

        ctx.queue.run(|| {
            let bytes = data.as_bytes_mut();
            for (i, row) in rows.iter().enumerate() {
                if row.is_valid() {
                    bytes[i * width..(i + 1) * width].copy_from_slice(row.bytes());
                } else {
                    // Null rows keep zeroed value bytes; only the bit matters.
                    mask.set(i, false);
                    saw_null = true;
                }
            }
        });

        let validity = (attach_mask || saw_null).then_some(mask);
        Column::new(dtype, rows.len(), data, validity, Vec::new())
    } else {
        let kernel = varwidth::kernel_for(dtype)?;
        let mut column = ctx.queue.run(|| kernel.rebuild(dtype, rows, ctx.allocator))?;
        if attach_mask {
            column.ensure_validity();
        }
        Ok(column)
    }
}
