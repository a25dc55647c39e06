//! Dense matrices over a choice of storage layout.
//!
//! Raw inputs and design matrices are built row-major; training converts
//! the design matrix to column-major once so every gradient reduction runs
//! over contiguous memory.

use std::marker::PhantomData;

use super::layout::{ColMajor, Layout, RowMajor, StridedIter};

/// A dense matrix stored contiguously in the layout `L`.
///
/// The contiguous dimension has O(1) slice access (`row_slice` for
/// [`RowMajor`], `col_slice` for [`ColMajor`]); the other dimension is
/// reachable through a strided iterator. The storage parameter `S` admits
/// both owned matrices (`Box<[T]>`, the default) and zero-copy views over
/// borrowed slices.
///
/// # Example
///
/// ```
/// use basisfit::data::{ColMatrix, RowMatrix};
///
/// let rows = RowMatrix::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
/// assert_eq!(rows.row_slice(1), &[4.0, 5.0, 6.0]);
///
/// let cols: ColMatrix<f64> = rows.to_layout();
/// assert_eq!(cols.col_slice(1), &[2.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrix<T = f64, L: Layout = RowMajor, S: AsRef<[T]> = Box<[T]>> {
    data: S,
    num_rows: usize,
    num_cols: usize,
    _marker: PhantomData<(T, L)>,
}

impl<T, L: Layout> DenseMatrix<T, L, Box<[T]>> {
    /// Take ownership of `data`, interpreted in the layout `L`.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    pub fn from_vec(data: Vec<T>, num_rows: usize, num_cols: usize) -> Self {
        assert_eq!(
            data.len(),
            num_rows * num_cols,
            "Data length {} does not match dimensions {}x{}",
            data.len(),
            num_rows,
            num_cols
        );
        Self {
            data: data.into_boxed_slice(),
            num_rows,
            num_cols,
            _marker: PhantomData,
        }
    }
}

impl<T, L: Layout> DenseMatrix<T, L, &[T]> {
    /// Borrow `data` as a matrix without copying.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    pub fn from_slice(data: &[T], num_rows: usize, num_cols: usize) -> DenseMatrix<T, L, &[T]> {
        assert_eq!(
            data.len(),
            num_rows * num_cols,
            "Data length {} does not match dimensions {}x{}",
            data.len(),
            num_rows,
            num_cols
        );
        DenseMatrix {
            data,
            num_rows,
            num_cols,
            _marker: PhantomData,
        }
    }
}

impl<T, L: Layout, S: AsRef<[T]>> DenseMatrix<T, L, S> {
    /// The backing slice, in storage order for the layout `L`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_ref()
    }

    /// Number of rows (observations).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (coordinates).
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.num_rows || col >= self.num_cols {
            return None;
        }
        let offset = L::offset(row, col, self.num_rows, self.num_cols);
        Some(&self.data.as_ref()[offset])
    }
}

impl<T: Copy, L: Layout, S: AsRef<[T]>> DenseMatrix<T, L, S> {
    /// Copy into a matrix with the layout `L2`.
    ///
    /// Elements are written in the target's storage order, reading each one
    /// through the source layout's offset arithmetic. O(rows * cols).
    pub fn to_layout<L2: Layout>(&self) -> DenseMatrix<T, L2, Box<[T]>> {
        let src = self.data.as_ref();
        let data: Vec<T> = (0..src.len())
            .map(|offset| {
                let (row, col) = L2::position(offset, self.num_rows, self.num_cols);
                src[L::offset(row, col, self.num_rows, self.num_cols)]
            })
            .collect();

        DenseMatrix {
            data: data.into_boxed_slice(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
            _marker: PhantomData,
        }
    }
}

impl<T, S: AsRef<[T]>> DenseMatrix<T, RowMajor, S> {
    /// One row as a contiguous slice. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[inline]
    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.num_rows, "Row index {} out of bounds", row);
        let start = row * self.num_cols;
        &self.data.as_ref()[start..start + self.num_cols]
    }

    /// Strided iteration over one column.
    ///
    /// # Panics
    ///
    /// Panics if `col >= num_cols`.
    #[inline]
    pub fn col_iter(&self, col: usize) -> StridedIter<'_, T> {
        assert!(col < self.num_cols, "Column index {} out of bounds", col);
        let tail = self.data.as_ref().get(col..).unwrap_or(&[]);
        StridedIter::new(tail, self.num_cols)
    }
}

impl<T, S: AsRef<[T]>> DenseMatrix<T, ColMajor, S> {
    /// One column as a contiguous slice. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `col >= num_cols`.
    #[inline]
    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.num_cols, "Column index {} out of bounds", col);
        let start = col * self.num_rows;
        &self.data.as_ref()[start..start + self.num_rows]
    }

    /// Strided iteration over one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    #[inline]
    pub fn row_iter(&self, row: usize) -> StridedIter<'_, T> {
        assert!(row < self.num_rows, "Row index {} out of bounds", row);
        let tail = self.data.as_ref().get(row..).unwrap_or(&[]);
        StridedIter::new(tail, self.num_rows)
    }
}
