//! The packing engine: split a table and deep-copy every partition into one
//! freshly allocated, self-contained block.
//!
//! The partitions are the same as [`crate::kernels::split::split_table`]'s,
//! but each one's data lives in exactly one buffer, laid out per column in
//! table-declaration order: the data region (for `Utf8`, payload then a
//! zero-rebased offsets region), then the validity-bitmask region, each
//! rounded up to the allocator's required alignment. Footprints are computed
//! exactly before a single allocation per partition; one layout pass and one
//! copy pass, never a reallocation.
//!
//! The result type owns the block and materializes views on demand, so a
//! view is inseparable from its owning buffer: the type system provides no
//! way to keep one after the `PackedTable` is dropped.

use crate::column::ColumnView;
use crate::error::Result;
use crate::exec::ExecContext;
use crate::kernels::split::split_bounds;
use crate::null_handling::bitmap;
use crate::storage::{align_up, Buffer};
use crate::table::TableView;
use crate::types::DataType;
use crate::utils;

//==================================================================================
// 1. Packed Layout & Result
//==================================================================================

/// One byte region inside a packed block.
#[derive(Debug, Clone, Copy)]
struct Region {
    offset: usize,
    len: usize,
}

/// Where one column's regions sit inside a packed block.
#[derive(Debug, Clone)]
struct PackedColumnLayout {
    dtype: DataType,
    rows: usize,
    data: Region,
    /// Zero-rebased `Int32` offsets region, variable-width columns only.
    offsets: Option<Region>,
    /// Packed validity bytes, present iff the source column carried a mask.
    validity: Option<Region>,
}

/// One partition of a contiguous split: a single owning buffer plus the
/// layout needed to view it as a table.
///
/// The table view borrows from `self`, so it cannot outlive the block; the
/// buffer has no other owner and is released when the `PackedTable` drops.
#[derive(Debug)]
pub struct PackedTable {
    buffer: Buffer,
    columns: Vec<PackedColumnLayout>,
}

impl PackedTable {
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.rows)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The raw packed block, e.g. for transport across a memory-space
    /// boundary. Reinterpreting it requires externally supplied type
    /// information; the block itself carries none.
    pub fn block_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// A table view over the packed block.
    pub fn table(&self) -> Result<TableView<'_>> {
        let bytes = self.buffer.as_bytes();
        let mut columns = Vec::with_capacity(self.columns.len());
        for layout in &self.columns {
            let data = &bytes[layout.data.offset..layout.data.offset + layout.data.len];
            let validity = layout
                .validity
                .map(|v| bitmap::from_packed_bytes(&bytes[v.offset..v.offset + v.len], layout.rows));
            let offsets = match layout.offsets {
                Some(o) => Some(utils::safe_bytes_to_typed_slice::<i32>(
                    &bytes[o.offset..o.offset + o.len],
                )?),
                None => None,
            };
            columns.push(ColumnView::from_parts(
                layout.dtype,
                layout.rows,
                data,
                validity,
                offsets,
            )?);
        }
        TableView::new(columns)
    }
}

//==================================================================================
// 2. Packing Engine
//==================================================================================

/// Deep-copy splits `input` into self-contained single-buffer partitions.
///
/// # Errors
/// `InvalidRange` for decreasing or out-of-range boundaries;
/// `AllocationFailed` if a partition block cannot be allocated.
pub fn contiguous_split(
    input: &TableView<'_>,
    splits: &[usize],
    ctx: &ExecContext<'_>,
) -> Result<Vec<PackedTable>> {
    let bounds = split_bounds(input.num_rows(), splits)?;
    let alignment = ctx.allocator.required_alignment();

    let mut partitions = Vec::with_capacity(bounds.len());
    for (partition, &(begin, end)) in bounds.iter().enumerate() {
        let rows = end - begin;

        // Layout pass: exact footprints, then one allocation.
        let mut cursor = 0usize;
        let mut layouts = Vec::with_capacity(input.num_columns());
        for column in input.columns() {
            let data_len = match column.dtype().element_width() {
                Some(width) => rows * width,
                None => payload_window(column, begin, end).1,
            };
            let data = Region {
                offset: align_up(cursor, alignment),
                len: data_len,
            };
            cursor = data.offset + data.len;

            let offsets = if column.dtype().is_fixed_width() {
                None
            } else {
                let region = Region {
                    offset: align_up(cursor, alignment),
                    len: (rows + 1) * std::mem::size_of::<i32>(),
                };
                cursor = region.offset + region.len;
                Some(region)
            };

            let validity = if column.has_validity() {
                let region = Region {
                    offset: align_up(cursor, alignment),
                    len: rows.div_ceil(8),
                };
                cursor = region.offset + region.len;
                Some(region)
            } else {
                None
            };

            layouts.push(PackedColumnLayout {
                dtype: column.dtype(),
                rows,
                data,
                offsets,
                validity,
            });
        }

        let total = cursor;
        let mut buffer = ctx.allocator.allocate(total)?;
        log_metric!(
            "event" = "contiguous_split",
            "partition" = &partition,
            "rows" = &rows,
            "bytes" = &total
        );

        // Copy pass: bulk value bytes, rebased offsets, packed validity bits.
        ctx.queue.run(|| {
            let bytes = buffer.as_bytes_mut();
            for (column, layout) in input.columns().iter().zip(&layouts) {
                match column.dtype().element_width() {
                    Some(width) => {
                        bytes[layout.data.offset..layout.data.offset + layout.data.len]
                            .copy_from_slice(&column.data()[begin * width..end * width]);
                    }
                    None => {
                        let (payload_begin, payload_len) = payload_window(column, begin, end);
                        bytes[layout.data.offset..layout.data.offset + layout.data.len]
                            .copy_from_slice(
                                &column.data()[payload_begin..payload_begin + payload_len],
                            );
                        if let Some(region) = layout.offsets {
                            let rebased = rebase_offsets(column, begin, end);
                            bytes[region.offset..region.offset + region.len]
                                .copy_from_slice(bytemuck::cast_slice(&rebased));
                        }
                    }
                }
                if let (Some(region), Some(mask)) = (layout.validity, column.validity()) {
                    let packed = bitmap::to_packed_bytes(&mask[begin..end]);
                    bytes[region.offset..region.offset + region.len].copy_from_slice(&packed);
                }
            }
        });

        partitions.push(PackedTable {
            buffer,
            columns: layouts,
        });
    }
    Ok(partitions)
}

/// Byte window of a variable-width column's payload for rows `[begin, end)`.
fn payload_window(column: &ColumnView<'_>, begin: usize, end: usize) -> (usize, usize) {
    if begin == end {
        return (0, 0);
    }
    let offsets = column.offsets().unwrap_or(&[]);
    let first = offsets[begin] as usize;
    let last = offsets[end] as usize;
    (first, last - first)
}

/// Offsets of rows `[begin, end)` rebased so the first payload byte is 0.
fn rebase_offsets(column: &ColumnView<'_>, begin: usize, end: usize) -> Vec<i32> {
    if begin == end {
        return vec![0];
    }
    let offsets = column.offsets().unwrap_or(&[]);
    let base = offsets[begin];
    offsets[begin..=end].iter().map(|&o| o - base).collect()
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
