//! Scatters rows (or broadcast scalar rows) into a copy of a target table.
//!
//! The scatter is out-of-place: row `map[i]` of the result receives row `i`
//! of the source, and every other row copies the target. A negative map
//! value normalizes against the *target* row count. Duplicate normalized
//! indices are a caller obligation and produce an undefined result; the
//! engine never validates them. The boolean-mask forms address destination
//! rows positionally: the `k`-th `true` bit of the mask receives input row
//! `k` (a null mask bit counts as `false`).

use crate::column::{ColumnView, Scalar};
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::kernels::gather::resolve_map;
use crate::kernels::{assemble_rows, varwidth::RowRef};
use crate::table::{Table, TableView};
use crate::types::DataType;

//==================================================================================
// 1. Map-Based Scatter
//==================================================================================

/// Scatters `source` rows into a copy of `target` according to `map`.
///
/// # Errors
/// * `LengthMismatch` if column counts differ or `map` is longer than `source`.
/// * `TypeMismatch` if any source/target column pair disagrees on type.
/// * `IndexOutOfBounds` if `check_bounds` is set and a normalized index falls
///   outside the target row space.
pub fn scatter(
    source: &TableView<'_>,
    map: &ColumnView<'_>,
    target: &TableView<'_>,
    check_bounds: bool,
    ctx: &ExecContext<'_>,
) -> Result<Table> {
    check_column_pairs(source, target)?;
    if map.len() > source.num_rows() {
        return Err(SlateError::LengthMismatch {
            expected: source.num_rows(),
            found: map.len(),
        });
    }
    let rows = resolve_map(map, target.num_rows(), check_bounds)?;

    let mut columns = Vec::with_capacity(target.num_columns());
    for (source_col, target_col) in source.columns().iter().zip(target.columns()) {
        let mut refs: Vec<RowRef<'_>> = (0..target.num_rows())
            .map(|r| RowRef::Slot(target_col, r))
            .collect();
        for (i, &dst) in rows.iter().enumerate() {
            refs[dst] = RowRef::Slot(source_col, i);
        }
        let attach = target_col.has_validity() || source_col.has_validity();
        columns.push(assemble_rows(target_col.dtype(), &refs, attach, ctx)?);
    }
    Table::new(columns)
}

/// Scatters one broadcast scalar row into a copy of `target`: every mapped
/// destination row receives `source[c]` in column `c`.
pub fn scatter_scalars(
    source: &[Scalar],
    map: &ColumnView<'_>,
    target: &TableView<'_>,
    check_bounds: bool,
    ctx: &ExecContext<'_>,
) -> Result<Table> {
    check_scalar_row(source, target)?;
    let rows = resolve_map(map, target.num_rows(), check_bounds)?;

    let mut columns = Vec::with_capacity(target.num_columns());
    for (scalar, target_col) in source.iter().zip(target.columns()) {
        let mut refs: Vec<RowRef<'_>> = (0..target.num_rows())
            .map(|r| RowRef::Slot(target_col, r))
            .collect();
        for &dst in &rows {
            refs[dst] = RowRef::Broadcast(scalar);
        }
        let attach = target_col.has_validity() || !scalar.is_valid();
        columns.push(assemble_rows(target_col.dtype(), &refs, attach, ctx)?);
    }
    Table::new(columns)
}

//==================================================================================
// 2. Boolean-Mask Scatter
//==================================================================================

/// Scatters `input` rows to the positions of the `true` bits in `mask`.
///
/// # Errors
/// * `NonBooleanMask` if `mask` is not Boolean.
/// * `LengthMismatch` if `mask` and `target` disagree on row count, column
///   counts differ, or the mask holds more `true` bits than `input` has rows.
/// * `TypeMismatch` on any input/target column pair disagreement.
pub fn boolean_mask_scatter(
    input: &TableView<'_>,
    target: &TableView<'_>,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Table> {
    check_column_pairs(input, target)?;
    let positions = mask_positions(mask, target.num_rows())?;
    if positions.len() > input.num_rows() {
        return Err(SlateError::LengthMismatch {
            expected: input.num_rows(),
            found: positions.len(),
        });
    }

    let mut columns = Vec::with_capacity(target.num_columns());
    for (input_col, target_col) in input.columns().iter().zip(target.columns()) {
        let mut refs: Vec<RowRef<'_>> = (0..target.num_rows())
            .map(|r| RowRef::Slot(target_col, r))
            .collect();
        for (k, &pos) in positions.iter().enumerate() {
            refs[pos] = RowRef::Slot(input_col, k);
        }
        let attach = target_col.has_validity() || input_col.has_validity();
        columns.push(assemble_rows(target_col.dtype(), &refs, attach, ctx)?);
    }
    Table::new(columns)
}

/// Broadcast form: every `true` position of `mask` receives the scalar row.
pub fn boolean_mask_scatter_scalars(
    input: &[Scalar],
    target: &TableView<'_>,
    mask: &ColumnView<'_>,
    ctx: &ExecContext<'_>,
) -> Result<Table> {
    check_scalar_row(input, target)?;
    let positions = mask_positions(mask, target.num_rows())?;

    let mut columns = Vec::with_capacity(target.num_columns());
    for (scalar, target_col) in input.iter().zip(target.columns()) {
        let mut refs: Vec<RowRef<'_>> = (0..target.num_rows())
            .map(|r| RowRef::Slot(target_col, r))
            .collect();
        for &pos in &positions {
            refs[pos] = RowRef::Broadcast(scalar);
        }
        let attach = target_col.has_validity() || !scalar.is_valid();
        columns.push(assemble_rows(target_col.dtype(), &refs, attach, ctx)?);
    }
    Table::new(columns)
}

//==================================================================================
// 3. Shared Checks
//==================================================================================

fn check_column_pairs(source: &TableView<'_>, target: &TableView<'_>) -> Result<()> {
    if source.num_columns() != target.num_columns() {
        return Err(SlateError::LengthMismatch {
            expected: target.num_columns(),
            found: source.num_columns(),
        });
    }
    for (source_col, target_col) in source.columns().iter().zip(target.columns()) {
        if source_col.dtype() != target_col.dtype() {
            return Err(SlateError::TypeMismatch {
                expected: target_col.dtype(),
                found: source_col.dtype(),
            });
        }
    }
    Ok(())
}

fn check_scalar_row(source: &[Scalar], target: &TableView<'_>) -> Result<()> {
    if source.len() != target.num_columns() {
        return Err(SlateError::LengthMismatch {
            expected: target.num_columns(),
            found: source.len(),
        });
    }
    for (scalar, target_col) in source.iter().zip(target.columns()) {
        if scalar.dtype() != target_col.dtype() {
            return Err(SlateError::TypeMismatch {
                expected: target_col.dtype(),
                found: scalar.dtype(),
            });
        }
    }
    Ok(())
}

/// Destination row indices of the `true` bits of a boolean mask column, in
/// ascending order. A null mask bit counts as `false`.
fn mask_positions(mask: &ColumnView<'_>, target_rows: usize) -> Result<Vec<usize>> {
    if mask.dtype() != DataType::Boolean {
        return Err(SlateError::NonBooleanMask(mask.dtype()));
    }
    if mask.len() != target_rows {
        return Err(SlateError::LengthMismatch {
            expected: target_rows,
            found: mask.len(),
        });
    }
    let flags = mask.values::<u8>()?;
    Ok((0..mask.len())
        .filter(|&i| mask.is_valid(i) && flags[i] != 0)
        .collect())
}
