//! Allocation helpers: schema-only clones and uninitialized like-typed
//! allocations with a validity-mask policy.

use crate::column::{Column, ColumnView};
use crate::error::{Result, SlateError};
use crate::exec::ExecContext;
use crate::null_handling::bitmap;
use crate::storage::Buffer;
use crate::table::{Table, TableView};
use crate::types::{DataType, MaskAllocationPolicy};

/// A schema-only clone: same type, zero rows, no data or validity buffer
/// allocated. Child schema (the offsets child of a variable-width column) is
/// preserved, itself empty.
pub fn empty_like(input: &ColumnView<'_>) -> Result<Column> {
    let children = if input.dtype().is_fixed_width() {
        Vec::new()
    } else {
        vec![Column::new(
            DataType::Int32,
            0,
            Buffer::default(),
            None,
            Vec::new(),
        )?]
    };
    Column::new(input.dtype(), 0, Buffer::default(), None, children)
}

/// A table of empty columns with the same types as `input`.
pub fn empty_like_table(input: &TableView<'_>) -> Result<Table> {
    let columns = input
        .columns()
        .iter()
        .map(empty_like)
        .collect::<Result<Vec<_>>>()?;
    Table::new(columns)
}

/// An uninitialized column of `input`'s type with capacity for `size` rows
/// (default: `input`'s row count). Fixed-width types only. Whether a
/// validity buffer is present is governed solely by `mask_alloc`.
///
/// # Errors
/// `UnsupportedType` for variable-width types; `AllocationFailed` if the
/// buffer cannot be allocated.
pub fn allocate_like(
    input: &ColumnView<'_>,
    size: Option<usize>,
    mask_alloc: MaskAllocationPolicy,
    ctx: &ExecContext<'_>,
) -> Result<Column> {
    let width = input
        .dtype()
        .element_width()
        .ok_or_else(|| SlateError::UnsupportedType(input.dtype().to_string()))?;
    let rows = size.unwrap_or_else(|| input.len());

    let data = ctx.allocator.allocate(rows * width)?;
    let validity = match mask_alloc {
        MaskAllocationPolicy::Never => None,
        MaskAllocationPolicy::Retain => input.has_validity().then(|| bitmap::all_valid(rows)),
        MaskAllocationPolicy::Always => Some(bitmap::all_valid(rows)),
    };
    Column::new(input.dtype(), rows, data, validity, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn ctx() -> ExecContext<'static> {
        ExecContext::default()
    }

    #[test]
    fn test_empty_like_is_schema_only() {
        let col = Column::from_options(DataType::Int32, &[Some(1i32), None]).unwrap();
        let empty = empty_like(&col.view()).unwrap();

        assert_eq!(empty.dtype(), DataType::Int32);
        assert_eq!(empty.len(), 0);
        assert!(!empty.has_validity());
    }

    #[test]
    fn test_empty_like_is_idempotent() {
        let col = Column::utf8_from_strs(&["a", "bb"]).unwrap();
        let once = empty_like(&col.view()).unwrap();
        let twice = empty_like(&once.view()).unwrap();

        assert_eq!(once.dtype(), twice.dtype());
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.children().len(), twice.children().len());
        assert_eq!(once.children()[0].dtype(), DataType::Int32);
    }

    #[test]
    fn test_empty_like_table_preserves_schema() {
        let table = Table::new(vec![
            Column::from_slice(DataType::Float64, &[1.0f64]).unwrap(),
            Column::utf8_from_strs(&["x"]).unwrap(),
        ])
        .unwrap();

        let empty = empty_like_table(&table.view()).unwrap();
        assert_eq!(empty.num_rows(), 0);
        assert_eq!(empty.num_columns(), 2);
        assert_eq!(empty.column(0).dtype(), DataType::Float64);
        assert_eq!(empty.column(1).dtype(), DataType::Utf8);
    }

    #[test]
    fn test_allocate_like_mask_policies() {
        let nullable = Column::from_options(DataType::Int32, &[Some(1i32), None]).unwrap();
        let plain = Column::from_slice(DataType::Int32, &[1i32, 2]).unwrap();

        let out =
            allocate_like(&nullable.view(), None, MaskAllocationPolicy::Never, &ctx()).unwrap();
        assert!(!out.has_validity());

        let out =
            allocate_like(&nullable.view(), None, MaskAllocationPolicy::Retain, &ctx()).unwrap();
        assert!(out.has_validity());

        let out =
            allocate_like(&plain.view(), None, MaskAllocationPolicy::Retain, &ctx()).unwrap();
        assert!(!out.has_validity());

        let out =
            allocate_like(&plain.view(), None, MaskAllocationPolicy::Always, &ctx()).unwrap();
        assert!(out.has_validity());
    }

    #[test]
    fn test_allocate_like_explicit_size() {
        let col = Column::from_slice(DataType::Int64, &[1i64, 2, 3]).unwrap();

        let out = allocate_like(&col.view(), Some(7), MaskAllocationPolicy::Retain, &ctx())
            .unwrap();
        assert_eq!(out.len(), 7);

        let out = allocate_like(&col.view(), Some(0), MaskAllocationPolicy::Always, &ctx())
            .unwrap();
        assert_eq!(out.len(), 0);
        assert!(out.has_validity());
    }

    #[test]
    fn test_allocate_like_rejects_variable_width() {
        let col = Column::utf8_from_strs(&["a"]).unwrap();
        assert!(matches!(
            allocate_like(&col.view(), None, MaskAllocationPolicy::Retain, &ctx()),
            Err(SlateError::UnsupportedType(_))
        ));
    }
}
