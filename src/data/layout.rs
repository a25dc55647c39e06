//! Storage layouts for dense matrices.
//!
//! A dense matrix keeps its elements in one contiguous slice; the layout
//! decides which dimension is contiguous. [`RowMajor`] keeps each
//! observation's features together, which is what the row-wise basis
//! expansion wants. [`ColMajor`] keeps each feature column together, which
//! is what the per-coordinate gradient reduction wants. Layouts are
//! zero-sized marker types plugged in as a type parameter, so the offset
//! arithmetic is monomorphized away.

use std::iter::FusedIterator;

mod sealed {
    pub trait Sealed {}
}

/// Mapping between logical `(row, col)` positions and storage offsets.
///
/// Sealed: the only layouts are [`RowMajor`] and [`ColMajor`], and the two
/// methods are exact inverses of each other for a fixed shape.
pub trait Layout: sealed::Sealed + Copy + Default + std::fmt::Debug + 'static {
    /// Storage offset of the element at `(row, col)`.
    fn offset(row: usize, col: usize, num_rows: usize, num_cols: usize) -> usize;

    /// Logical `(row, col)` of the element stored at `offset`.
    fn position(offset: usize, num_rows: usize, num_cols: usize) -> (usize, usize);
}

/// Rows are contiguous: `offset = row * num_cols + col`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

impl sealed::Sealed for RowMajor {}

impl Layout for RowMajor {
    #[inline]
    fn offset(row: usize, col: usize, _num_rows: usize, num_cols: usize) -> usize {
        row * num_cols + col
    }

    #[inline]
    fn position(offset: usize, _num_rows: usize, num_cols: usize) -> (usize, usize) {
        (offset / num_cols, offset % num_cols)
    }
}

/// Columns are contiguous: `offset = col * num_rows + row`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColMajor;

impl sealed::Sealed for ColMajor {}

impl Layout for ColMajor {
    #[inline]
    fn offset(row: usize, col: usize, num_rows: usize, _num_cols: usize) -> usize {
        col * num_rows + row
    }

    #[inline]
    fn position(offset: usize, num_rows: usize, _num_cols: usize) -> (usize, usize) {
        (offset % num_rows, offset / num_rows)
    }
}

/// Iterator over the non-contiguous dimension of a matrix.
///
/// Yields every `stride`-th element of a slice, starting at its head:
/// columns of a row-major matrix, rows of a column-major one.
#[derive(Debug, Clone)]
pub struct StridedIter<'a, T> {
    rest: &'a [T],
    stride: usize,
}

impl<'a, T> StridedIter<'a, T> {
    /// Iterate over `slice[0]`, `slice[stride]`, `slice[2 * stride]`, ...
    ///
    /// # Panics
    ///
    /// Panics if `stride == 0`.
    #[inline]
    pub fn new(slice: &'a [T], stride: usize) -> Self {
        assert!(stride > 0, "stride must be positive");
        Self {
            rest: slice,
            stride,
        }
    }
}

impl<'a, T> Iterator for StridedIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.rest.first()?;
        self.rest = self.rest.get(self.stride..).unwrap_or(&[]);
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rest.len().div_ceil(self.stride);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for StridedIter<'_, T> {}
impl<T> FusedIterator for StridedIter<'_, T> {}
