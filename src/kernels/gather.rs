//! Gathers the specified rows (including their validity bits) of a table.
//!
//! Row `i` of the result is row `map[i]` of the source; a negative map value
//! `x` is interpreted as `x + n`, where `n` is the source row count. Bounds
//! checking is a per-call opt-in: with it, every normalized index is
//! validated before any output is produced; without it, an out-of-range
//! index is undefined by contract (this implementation panics at the row
//! access rather than clamping).

use num_traits::{PrimInt, ToPrimitive};

use crate::column::ColumnView;
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::kernels::{assemble_rows, varwidth::RowRef};
use crate::table::{Table, TableView};
use crate::types::DataType;

/// Gathers rows of `source` according to `map`.
///
/// # Args
/// * `source`: the table whose rows will be gathered.
/// * `map`: a non-nullable integral column; its length is the output row count.
/// * `check_bounds`: validate every normalized index against `[0, n)` first.
///
/// # Errors
/// * `InvalidMap` if `map` is nullable or not integral.
/// * `IndexOutOfBounds` if `check_bounds` is set and a normalized index falls
///   outside `[0, n)`; no partial output is produced.
pub fn gather(
    source: &TableView<'_>,
    map: &ColumnView<'_>,
    check_bounds: bool,
    ctx: &ExecContext<'_>,
) -> Result<Table> {
    let rows = resolve_map(map, source.num_rows(), check_bounds)?;
    log::debug!(
        "gather: {} rows from {} source rows, {} columns",
        rows.len(),
        source.num_rows(),
        source.num_columns()
    );

    let mut columns = Vec::with_capacity(source.num_columns());
    for column in source.columns() {
        let refs: Vec<RowRef<'_>> = rows.iter().map(|&r| RowRef::Slot(column, r)).collect();
        columns.push(assemble_rows(column.dtype(), &refs, column.has_validity(), ctx)?);
    }
    Table::new(columns)
}

/// Normalizes a gather/scatter map into concrete row indices of a row space
/// of `num_rows` rows.
pub(crate) fn resolve_map(
    map: &ColumnView<'_>,
    num_rows: usize,
    check_bounds: bool,
) -> Result<Vec<usize>> {
    if map.has_validity() {
        return Err(SlateError::InvalidMap(
            "map column carries a validity mask".to_string(),
        ));
    }
    if !map.dtype().is_integral() {
        return Err(SlateError::InvalidMap(format!(
            "map column type is {}",
            map.dtype()
        )));
    }
    match map.dtype() {
        DataType::Int8 => resolve_typed(map.values::<i8>()?, num_rows, check_bounds),
        DataType::Int16 => resolve_typed(map.values::<i16>()?, num_rows, check_bounds),
        DataType::Int32 => resolve_typed(map.values::<i32>()?, num_rows, check_bounds),
        DataType::Int64 => resolve_typed(map.values::<i64>()?, num_rows, check_bounds),
        DataType::UInt8 => resolve_typed(map.values::<u8>()?, num_rows, check_bounds),
        DataType::UInt16 => resolve_typed(map.values::<u16>()?, num_rows, check_bounds),
        DataType::UInt32 => resolve_typed(map.values::<u32>()?, num_rows, check_bounds),
        DataType::UInt64 => resolve_typed(map.values::<u64>()?, num_rows, check_bounds),
        other => Err(SlateError::InvalidMap(format!(
            "map column type is {}",
            other
        ))),
    }
}

fn resolve_typed<T>(values: &[T], num_rows: usize, check_bounds: bool) -> Result<Vec<usize>>
where
    T: PrimInt + ToPrimitive,
{
    let n = num_rows as i64;
    values
        .iter()
        .map(|&v| {
            let raw = v.to_i64().unwrap_or(i64::MAX);
            let index = if raw < 0 { raw + n } else { raw };
            if check_bounds && !(0..n).contains(&index) {
                return Err(SlateError::IndexOutOfBounds {
                    index: raw,
                    size: num_rows,
                });
            }
            Ok(index as usize)
        })
        .collect()
}
