//! This module defines the owned and non-owning representations of a column.
//!
//! The split is deliberate and enforced by the type system:
//! * [`Column`] owns its data buffer, its optional validity bitmask, and its
//!   children. Dropping it releases the storage.
//! * [`ColumnView`] / [`MutableColumnView`] are non-owning references into a
//!   data region whose lifetime they do not control. A view never exposes a
//!   release operation; it must not be used after its backing storage is
//!   gone, which the borrow checker enforces for in-process storage.
//!
//! A column is a type tag, a row count, a data buffer, an optional validity
//! bitmask (one bit per row; absence means "all valid"), and zero or more
//! child columns for variable-width kinds. `Utf8` columns carry the payload
//! bytes in `data` and a single `Int32` offsets child with `row_count + 1`
//! entries.

pub mod scalar;

pub use scalar::Scalar;

use crate::error::{Result, SlateError};
use crate::null_handling::bitmap::{self, Bitmap, BitmapSlice};
use crate::storage::Buffer;
use crate::types::DataType;
use crate::utils;

//==================================================================================
// 1. Owned Column
//==================================================================================

/// An owned, homogeneously typed array of row values with an optional
/// per-row validity bitmask.
#[derive(Debug, Clone)]
pub struct Column {
    dtype: DataType,
    len: usize,
    data: Buffer,
    validity: Option<Bitmap>,
    children: Vec<Column>,
}

impl Column {
    /// Assembles a column from its parts, validating the structural invariants.
    ///
    /// # Errors
    /// * `BufferMismatch` if a fixed-width data buffer is smaller than
    ///   `len * element_width`.
    /// * `LengthMismatch` if a validity mask covers fewer than `len` bits, or
    ///   a `Utf8` offsets child does not hold `len + 1` entries.
    /// * `InternalError` if a `Utf8` column's offsets reach outside the payload.
    pub fn new(
        dtype: DataType,
        len: usize,
        data: Buffer,
        validity: Option<Bitmap>,
        children: Vec<Column>,
    ) -> Result<Self> {
        if let Some(width) = dtype.element_width() {
            if data.len() < len * width {
                return Err(SlateError::BufferMismatch(len * width, data.len()));
            }
        } else {
            let offsets = match children.as_slice() {
                [child] if child.dtype == DataType::Int32 => child,
                _ => {
                    return Err(SlateError::InternalError(
                        "variable-width column requires a single Int32 offsets child".to_string(),
                    ))
                }
            };
            if len > 0 {
                if offsets.len != len + 1 {
                    return Err(SlateError::LengthMismatch {
                        expected: len + 1,
                        found: offsets.len,
                    });
                }
                let last = offsets.typed_value::<i32>(len)?;
                if last as usize > data.len() {
                    return Err(SlateError::InternalError(format!(
                        "offsets reach byte {} of a {}-byte payload",
                        last,
                        data.len()
                    )));
                }
            }
        }
        if let Some(mask) = &validity {
            if mask.len() < len {
                return Err(SlateError::LengthMismatch {
                    expected: len,
                    found: mask.len(),
                });
            }
        }
        Ok(Self {
            dtype,
            len,
            data,
            validity,
            children,
        })
    }

    /// Builds a fixed-width column from a typed slice, all rows valid.
    pub fn from_slice<T: bytemuck::Pod>(dtype: DataType, values: &[T]) -> Result<Self> {
        let width = dtype
            .element_width()
            .ok_or_else(|| SlateError::UnsupportedType(dtype.to_string()))?;
        if width != std::mem::size_of::<T>() {
            return Err(SlateError::BufferMismatch(width, std::mem::size_of::<T>()));
        }
        Self::new(
            dtype,
            values.len(),
            Buffer::from_bytes(bytemuck::cast_slice(values)),
            None,
            Vec::new(),
        )
    }

    /// Builds a fixed-width nullable column; `None` rows are null and their
    /// value bytes are zeroed.
    pub fn from_options<T: bytemuck::Pod>(dtype: DataType, values: &[Option<T>]) -> Result<Self> {
        let dense: Vec<T> = values.iter().map(|v| v.unwrap_or_else(T::zeroed)).collect();
        let mut column = Self::from_slice(dtype, &dense)?;
        column.validity = Some(bitmap::from_options(values));
        Ok(column)
    }

    /// Builds a `Boolean` column (one byte per value), all rows valid.
    pub fn from_bools(values: &[bool]) -> Self {
        let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        Self {
            dtype: DataType::Boolean,
            len: values.len(),
            data: Buffer::from_bytes(&bytes),
            validity: None,
            children: Vec::new(),
        }
    }

    /// Builds a nullable `Boolean` column.
    pub fn from_opt_bools(values: &[Option<bool>]) -> Self {
        let bytes: Vec<u8> = values
            .iter()
            .map(|v| v.unwrap_or(false) as u8)
            .collect();
        Self {
            dtype: DataType::Boolean,
            len: values.len(),
            data: Buffer::from_bytes(&bytes),
            validity: Some(bitmap::from_options(values)),
            children: Vec::new(),
        }
    }

    /// Builds a `Utf8` column from string slices, all rows valid.
    pub fn utf8_from_strs(values: &[&str]) -> Result<Self> {
        Self::build_utf8(values.iter().map(|s| Some(*s)), values.len(), false)
    }

    /// Builds a nullable `Utf8` column; `None` rows are null with empty payload.
    pub fn utf8_from_opts(values: &[Option<&str>]) -> Result<Self> {
        Self::build_utf8(values.iter().copied(), values.len(), true)
    }

    fn build_utf8<'s>(
        values: impl Iterator<Item = Option<&'s str>>,
        len: usize,
        nullable: bool,
    ) -> Result<Self> {
        let mut payload = Vec::new();
        let mut offsets = Vec::with_capacity(len + 1);
        let mut mask = bitmap::all_valid(len);
        offsets.push(0i32);
        for (row, value) in values.enumerate() {
            match value {
                Some(s) => payload.extend_from_slice(s.as_bytes()),
                None => mask.set(row, false),
            }
            let end = i32::try_from(payload.len()).map_err(|_| {
                SlateError::UnsupportedType("Utf8 payload exceeds Int32 offset range".to_string())
            })?;
            offsets.push(end);
        }
        let offsets_child = Self::from_slice(DataType::Int32, &offsets)?;
        Self::new(
            DataType::Utf8,
            len,
            Buffer::from_bytes(&payload),
            nullable.then_some(mask),
            vec![offsets_child],
        )
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_validity(&self) -> bool {
        self.validity.is_some()
    }

    pub fn null_count(&self) -> usize {
        self.validity
            .as_ref()
            .map_or(0, |m| m[..self.len].count_zeros())
    }

    pub fn children(&self) -> &[Column] {
        &self.children
    }

    /// Reads one fixed-width element; used by invariant checks and tests.
    fn typed_value<T: bytemuck::Pod>(&self, row: usize) -> Result<T> {
        let values = utils::safe_bytes_to_typed_slice::<T>(self.data.as_bytes())?;
        Ok(values[row])
    }

    /// Attaches an all-valid mask when none is present.
    pub(crate) fn ensure_validity(&mut self) {
        if self.validity.is_none() {
            self.validity = Some(bitmap::all_valid(self.len));
        }
    }

    /// An immutable, non-owning view of the whole column.
    pub fn view(&self) -> ColumnView<'_> {
        let offsets = if self.dtype.is_fixed_width() {
            None
        } else {
            let all: &[i32] = bytemuck::cast_slice(self.children[0].data.as_bytes());
            Some(&all[..all.len().min(self.len + 1)])
        };
        ColumnView {
            dtype: self.dtype,
            len: self.len,
            data: self.data.as_bytes(),
            validity: self.validity.as_deref().map(|m| &m[..self.len]),
            offsets,
        }
    }

    /// A mutable, non-owning view of the whole column. Fixed-width only: a
    /// mutable view cannot reallocate, so variable-width columns have no
    /// in-place mutation path.
    pub fn view_mut(&mut self) -> Result<MutableColumnView<'_>> {
        if !self.dtype.is_fixed_width() {
            return Err(SlateError::UnsupportedType(self.dtype.to_string()));
        }
        let len = self.len;
        Ok(MutableColumnView {
            dtype: self.dtype,
            len,
            data: self.data.as_bytes_mut(),
            validity: self
                .validity
                .as_mut()
                .map(|m| &mut m.as_mut_bitslice()[..len]),
        })
    }
}

//==================================================================================
// 2. Immutable View
//==================================================================================

/// A non-owning reference into a column's data region.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    dtype: DataType,
    len: usize,
    data: &'a [u8],
    validity: Option<&'a BitmapSlice>,
    offsets: Option<&'a [i32]>,
}

impl<'a> ColumnView<'a> {
    /// Assembles a view from raw parts, validating lengths. Used when the
    /// backing storage is a packed block rather than a `Column`.
    pub fn from_parts(
        dtype: DataType,
        len: usize,
        data: &'a [u8],
        validity: Option<&'a BitmapSlice>,
        offsets: Option<&'a [i32]>,
    ) -> Result<Self> {
        if let Some(width) = dtype.element_width() {
            if data.len() < len * width {
                return Err(SlateError::BufferMismatch(len * width, data.len()));
            }
        } else {
            let offsets = offsets.ok_or_else(|| {
                SlateError::InternalError("variable-width view requires offsets".to_string())
            })?;
            if len > 0 && offsets.len() != len + 1 {
                return Err(SlateError::LengthMismatch {
                    expected: len + 1,
                    found: offsets.len(),
                });
            }
        }
        if let Some(mask) = validity {
            if mask.len() < len {
                return Err(SlateError::LengthMismatch {
                    expected: len,
                    found: mask.len(),
                });
            }
        }
        Ok(Self {
            dtype,
            len,
            data,
            validity,
            offsets,
        })
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_validity(&self) -> bool {
        self.validity.is_some()
    }

    pub fn validity(&self) -> Option<&'a BitmapSlice> {
        self.validity
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn offsets(&self) -> Option<&'a [i32]> {
        self.offsets
    }

    pub fn null_count(&self) -> usize {
        self.validity.map_or(0, |m| m.count_zeros())
    }

    /// Validity of one row; rows of a column without a mask are always valid.
    pub fn is_valid(&self, row: usize) -> bool {
        self.validity.map_or(true, |m| m[row])
    }

    /// The typed element slice of a fixed-width view.
    ///
    /// # Errors
    /// `BufferMismatch` if `T` does not match the element width, or
    /// `UnsupportedType` for variable-width views.
    pub fn values<T: bytemuck::Pod>(&self) -> Result<&'a [T]> {
        let width = self
            .dtype
            .element_width()
            .ok_or_else(|| SlateError::UnsupportedType(self.dtype.to_string()))?;
        if width != std::mem::size_of::<T>() {
            return Err(SlateError::BufferMismatch(width, std::mem::size_of::<T>()));
        }
        utils::safe_bytes_to_typed_slice(self.data)
    }

    /// One typed element by copy.
    pub fn value<T: bytemuck::Pod>(&self, row: usize) -> Result<T> {
        Ok(self.values::<T>()?[row])
    }

    /// The raw bytes of one element. For `Utf8` this is the row's payload.
    pub fn element_bytes(&self, row: usize) -> &'a [u8] {
        match self.dtype.element_width() {
            Some(width) => &self.data[row * width..(row + 1) * width],
            None => {
                let offsets = self.offsets.unwrap_or(&[]);
                let begin = offsets[row] as usize;
                let end = offsets[row + 1] as usize;
                &self.data[begin..end]
            }
        }
    }

    /// One `Utf8` row as a string slice.
    pub fn str_value(&self, row: usize) -> Result<&'a str> {
        if self.dtype != DataType::Utf8 {
            return Err(SlateError::UnsupportedType(self.dtype.to_string()));
        }
        std::str::from_utf8(self.element_bytes(row))
            .map_err(|e| SlateError::InternalError(format!("invalid UTF-8 payload: {}", e)))
    }

    /// A zero-copy sub-view of rows `[begin, end)`.
    ///
    /// # Errors
    /// `InvalidRange` unless `begin <= end <= len`.
    pub fn sliced(&self, begin: usize, end: usize) -> Result<ColumnView<'a>> {
        if begin > end || end > self.len {
            return Err(SlateError::InvalidRange {
                begin,
                end,
                size: self.len,
            });
        }
        let data = match self.dtype.element_width() {
            Some(width) => &self.data[begin * width..end * width],
            // Variable-width slices keep the whole payload; the offsets
            // window is what narrows the view.
            None => self.data,
        };
        Ok(ColumnView {
            dtype: self.dtype,
            len: end - begin,
            data,
            validity: self.validity.map(|m| &m[begin..end]),
            offsets: self
                .offsets
                .map(|o| if o.is_empty() { o } else { &o[begin..=end] }),
        })
    }
}

//==================================================================================
// 3. Mutable View
//==================================================================================

/// A non-owning mutable reference into a fixed-width column's data region.
///
/// This is the only handle through which the engine mutates existing storage;
/// exactly one operation (`copy_range_in_place`) accepts it.
#[derive(Debug)]
pub struct MutableColumnView<'a> {
    dtype: DataType,
    len: usize,
    data: &'a mut [u8],
    validity: Option<&'a mut BitmapSlice>,
}

impl<'a> MutableColumnView<'a> {
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_validity(&self) -> bool {
        self.validity.is_some()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
    }

    /// The view's validity mask, if it carries one.
    pub fn validity_mut(&mut self) -> Option<&mut BitmapSlice> {
        self.validity.as_mut().map(|m| &mut **m)
    }

    /// Sets one row's validity bit. No-op when the view carries no mask; the
    /// operations that may introduce nulls check `has_validity` up front.
    pub fn set_valid(&mut self, row: usize, valid: bool) {
        if let Some(mask) = self.validity.as_mut() {
            mask.set(row, valid);
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_values() {
        let col = Column::from_slice(DataType::Int32, &[10i32, 20, 30]).unwrap();
        assert_eq!(col.len(), 3);
        assert!(!col.has_validity());
        assert_eq!(col.view().values::<i32>().unwrap(), &[10, 20, 30]);
    }

    #[test]
    fn test_from_slice_width_mismatch() {
        let result = Column::from_slice(DataType::Int32, &[1i64, 2]);
        assert!(matches!(result, Err(SlateError::BufferMismatch(4, 8))));
    }

    #[test]
    fn test_from_options_null_count() {
        let col = Column::from_options(DataType::Int64, &[Some(1i64), None, Some(3)]).unwrap();
        assert_eq!(col.null_count(), 1);
        let view = col.view();
        assert!(view.is_valid(0));
        assert!(!view.is_valid(1));
        assert_eq!(view.value::<i64>(2).unwrap(), 3);
    }

    #[test]
    fn test_utf8_column() {
        let col = Column::utf8_from_opts(&[Some("alpha"), None, Some("c")]).unwrap();
        let view = col.view();
        assert_eq!(view.str_value(0).unwrap(), "alpha");
        assert!(!view.is_valid(1));
        assert_eq!(view.element_bytes(1), b"");
        assert_eq!(view.str_value(2).unwrap(), "c");
    }

    #[test]
    fn test_sliced_view_fixed() {
        let col = Column::from_slice(DataType::Int16, &[1i16, 2, 3, 4, 5]).unwrap();
        let view = col.view().sliced(1, 4).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.values::<i16>().unwrap(), &[2, 3, 4]);

        assert!(col.view().sliced(3, 2).is_err());
        assert!(col.view().sliced(0, 6).is_err());
    }

    #[test]
    fn test_sliced_view_utf8() {
        let col = Column::utf8_from_strs(&["aa", "bbb", "c", "dddd"]).unwrap();
        let view = col.view().sliced(1, 3).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.str_value(0).unwrap(), "bbb");
        assert_eq!(view.str_value(1).unwrap(), "c");
    }

    #[test]
    fn test_view_mut_rejects_variable_width() {
        let mut col = Column::utf8_from_strs(&["x"]).unwrap();
        assert!(matches!(
            col.view_mut(),
            Err(SlateError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_bool_columns() {
        let col = Column::from_opt_bools(&[Some(true), None, Some(false)]);
        let view = col.view();
        assert_eq!(view.values::<u8>().unwrap(), &[1, 0, 0]);
        assert_eq!(view.null_count(), 1);
    }
}
