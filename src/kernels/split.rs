//! Zero-copy view construction: slicing by index pairs and splitting by
//! sorted boundaries.
//!
//! `slice` takes an even-length index list where pair `j` produces the view
//! `[indices[2j], indices[2j+1])`; pairs may overlap and need not be sorted.
//! `split` takes `m` sorted boundary points and produces `m + 1` adjacent,
//! non-overlapping views whose concatenation reconstructs the input exactly.
//! The table forms apply the identical list to every column simultaneously,
//! preserving row alignment. It is the caller's obligation that no returned
//! view outlive the viewed storage; the borrow checker enforces this for
//! in-process buffers.

use crate::column::ColumnView;
use crate::error::{Result, SlateError};
use crate::table::TableView;

/// Slices a column view into one view per index pair.
///
/// # Errors
/// `OddIndexCount` for an odd-length list; `InvalidRange` for a decreasing
/// pair or a bound outside `[0, len]`.
pub fn slice_column<'a>(
    input: &ColumnView<'a>,
    indices: &[usize],
) -> Result<Vec<ColumnView<'a>>> {
    if indices.len() % 2 != 0 {
        return Err(SlateError::OddIndexCount(indices.len()));
    }
    indices
        .chunks(2)
        .map(|pair| input.sliced(pair[0], pair[1]))
        .collect()
}

/// Slices a table view into one table view per index pair.
pub fn slice_table<'a>(input: &TableView<'a>, indices: &[usize]) -> Result<Vec<TableView<'a>>> {
    if indices.len() % 2 != 0 {
        return Err(SlateError::OddIndexCount(indices.len()));
    }
    indices
        .chunks(2)
        .map(|pair| {
            let columns = input
                .columns()
                .iter()
                .map(|c| c.sliced(pair[0], pair[1]))
                .collect::<Result<Vec<_>>>()?;
            TableView::new(columns)
        })
        .collect()
}

/// Splits a column view at the given sorted boundaries.
///
/// For `m` boundaries the result holds `m + 1` adjacent views: `[0, s[0])`,
/// `[s[j-1], s[j])`, ..., `[s[m-1], len)`.
pub fn split_column<'a>(input: &ColumnView<'a>, splits: &[usize]) -> Result<Vec<ColumnView<'a>>> {
    split_bounds(input.len(), splits)?
        .into_iter()
        .map(|(begin, end)| input.sliced(begin, end))
        .collect()
}

/// Splits a table view at the given sorted boundaries, every column alike.
pub fn split_table<'a>(input: &TableView<'a>, splits: &[usize]) -> Result<Vec<TableView<'a>>> {
    split_bounds(input.num_rows(), splits)?
        .into_iter()
        .map(|(begin, end)| {
            let columns = input
                .columns()
                .iter()
                .map(|c| c.sliced(begin, end))
                .collect::<Result<Vec<_>>>()?;
            TableView::new(columns)
        })
        .collect()
}

/// Expands a boundary list over `[0, len)` into `(begin, end)` partitions.
///
/// # Errors
/// `InvalidRange` if the boundaries decrease anywhere or exceed `len`.
pub(crate) fn split_bounds(len: usize, splits: &[usize]) -> Result<Vec<(usize, usize)>> {
    let mut previous = 0usize;
    for &boundary in splits {
        if boundary < previous || boundary > len {
            return Err(SlateError::InvalidRange {
                begin: previous,
                end: boundary,
                size: len,
            });
        }
        previous = boundary;
    }

    let mut bounds = Vec::with_capacity(splits.len() + 1);
    let mut begin = 0usize;
    for &boundary in splits {
        bounds.push((begin, boundary));
        begin = boundary;
    }
    bounds.push((begin, len));
    Ok(bounds)
}
