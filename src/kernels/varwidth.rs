//! The rebuild seam for variable-width column kinds.
//!
//! Fixed-width rearrangement is a bulk byte copy; variable-width kinds must
//! instead be rebuilt row by row because element payloads move. The engine
//! treats those rebuilds as external collaborators behind one narrow trait:
//! every rearrangement operation reduces its output to a list of [`RowRef`]s
//! and hands it to the kernel registered for the column's type, never
//! inspecting payload structure itself.
//!
//! One reference kernel for `Utf8` (offsets + payload) is registered so the
//! engine is usable stand-alone.

use crate::column::{Column, ColumnView, Scalar};
use crate::error::{Result, SlateError};
use crate::storage::Allocator;
use crate::types::DataType;

//==================================================================================
// 1. Row References
//==================================================================================

/// Where one output row's value comes from.
#[derive(Clone, Copy)]
pub enum RowRef<'a> {
    /// The `row`-th element of a column view.
    Slot(&'a ColumnView<'a>, usize),
    /// A broadcast scalar, shared by every row that references it.
    Broadcast(&'a Scalar),
}

impl RowRef<'_> {
    pub fn is_valid(&self) -> bool {
        match self {
            RowRef::Slot(view, row) => view.is_valid(*row),
            RowRef::Broadcast(scalar) => scalar.is_valid(),
        }
    }

    /// The element's value bytes. For invalid rows this is defined (zeroed or
    /// empty) but meaningless.
    pub fn bytes(&self) -> &[u8] {
        match self {
            RowRef::Slot(view, row) => view.element_bytes(*row),
            RowRef::Broadcast(scalar) => scalar.value_bytes(),
        }
    }
}

//==================================================================================
// 2. Kernel Trait & Registry
//==================================================================================

/// A per-kind transform kernel that rebuilds a variable-width column from a
/// row selection.
pub trait VariableWidthKernel: Send + Sync {
    /// Builds a new owned column whose row `i` is `rows[i]`, preserving each
    /// row's validity bit. The returned column carries a validity mask iff
    /// the selection contains an invalid row.
    fn rebuild(
        &self,
        dtype: DataType,
        rows: &[RowRef<'_>],
        allocator: &dyn Allocator,
    ) -> Result<Column>;
}

static UTF8_KERNEL: Utf8RebuildKernel = Utf8RebuildKernel;

/// Resolves the rebuild kernel for a variable-width type.
pub fn kernel_for(dtype: DataType) -> Result<&'static dyn VariableWidthKernel> {
    match dtype {
        DataType::Utf8 => Ok(&UTF8_KERNEL),
        other => Err(SlateError::UnsupportedType(other.to_string())),
    }
}

//==================================================================================
// 3. Utf8 Reference Kernel
//==================================================================================

/// Rebuilds `Utf8` columns: concatenates the selected payloads and lays down
/// a fresh, zero-based offsets child.
pub struct Utf8RebuildKernel;

impl VariableWidthKernel for Utf8RebuildKernel {
    fn rebuild(
        &self,
        dtype: DataType,
        rows: &[RowRef<'_>],
        allocator: &dyn Allocator,
    ) -> Result<Column> {
        let mut total = 0usize;
        for row in rows {
            if row.is_valid() {
                total += row.bytes().len();
            }
        }
        if i32::try_from(total).is_err() {
            return Err(SlateError::UnsupportedType(
                "Utf8 payload exceeds Int32 offset range".to_string(),
            ));
        }

        let mut payload = allocator.allocate(total)?;
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut mask = crate::null_handling::bitmap::all_valid(rows.len());
        let mut saw_null = false;
        offsets.push(0i32);

        let bytes = payload.as_bytes_mut();
        let mut cursor = 0usize;
        for (i, row) in rows.iter().enumerate() {
            if row.is_valid() {
                let value = row.bytes();
                bytes[cursor..cursor + value.len()].copy_from_slice(value);
                cursor += value.len();
            } else {
                mask.set(i, false);
                saw_null = true;
            }
            offsets.push(cursor as i32);
        }

        let offsets_child = Column::from_slice(DataType::Int32, &offsets)?;
        Column::new(
            dtype,
            rows.len(),
            payload,
            saw_null.then_some(mask),
            vec![offsets_child],
        )
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::HostAllocator;

    #[test]
    fn test_utf8_rebuild_reorders_payload() {
        let source = Column::utf8_from_strs(&["aa", "b", "cccc"]).unwrap();
        let view = source.view();
        let rows = [
            RowRef::Slot(&view, 2),
            RowRef::Slot(&view, 0),
            RowRef::Slot(&view, 2),
        ];

        let rebuilt = kernel_for(DataType::Utf8)
            .unwrap()
            .rebuild(DataType::Utf8, &rows, &HostAllocator)
            .unwrap();

        let out = rebuilt.view();
        assert_eq!(out.str_value(0).unwrap(), "cccc");
        assert_eq!(out.str_value(1).unwrap(), "aa");
        assert_eq!(out.str_value(2).unwrap(), "cccc");
        assert!(!rebuilt.has_validity());
    }

    #[test]
    fn test_utf8_rebuild_with_broadcast_and_nulls() {
        let source = Column::utf8_from_opts(&[Some("x"), None]).unwrap();
        let view = source.view();
        let fill = Scalar::utf8("fill");
        let rows = [
            RowRef::Slot(&view, 1),
            RowRef::Broadcast(&fill),
            RowRef::Slot(&view, 0),
        ];

        let rebuilt = kernel_for(DataType::Utf8)
            .unwrap()
            .rebuild(DataType::Utf8, &rows, &HostAllocator)
            .unwrap();

        let out = rebuilt.view();
        assert!(!out.is_valid(0));
        assert_eq!(out.str_value(1).unwrap(), "fill");
        assert_eq!(out.str_value(2).unwrap(), "x");
        assert_eq!(rebuilt.null_count(), 1);
    }

    #[test]
    fn test_no_kernel_for_fixed_width() {
        assert!(kernel_for(DataType::Int32).is_err());
    }
}
