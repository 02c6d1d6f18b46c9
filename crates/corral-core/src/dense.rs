// DenseBuffer — allocate-once backing storage for batches
//
// A DenseBuffer is a contiguous block of f32 values laid out as
// [rows, ...row_shape] in row-major order. It is allocated exactly once,
// sized for the worst case, and then overwritten in place: filling a new
// batch never reallocates. Consumers see the buffer through TensorView,
// a borrowed view that the borrow checker invalidates as soon as the
// owner is mutated again.

use crate::shape::Shape;

/// Owned, contiguous `[rows, ...row_shape]` storage.
///
/// Rows are the unit of writing: each sample copied into a batch lands in
/// one row. The whole buffer is the unit of reading: a completed batch is
/// published as a single [`TensorView`] over all rows.
#[derive(Debug, Clone)]
pub struct DenseBuffer {
    shape: Shape,
    row_len: usize,
    data: Vec<f32>,
}

impl DenseBuffer {
    /// Allocate a zero-filled buffer of `rows` rows, each shaped `row_shape`.
    ///
    /// This is the only allocation the buffer ever performs.
    pub fn zeros(rows: usize, row_shape: impl Into<Shape>) -> Self {
        let row_shape = row_shape.into();
        let row_len = row_shape.elem_count();
        Self {
            shape: row_shape.prepend(rows),
            row_len,
            data: vec![0.0; rows * row_len],
        }
    }

    /// Shape of the full buffer, leading dimension first: `[rows, ...]`.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.shape.dims()[0]
    }

    /// Elements per row.
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Read-only view of one row.
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.row_len;
        &self.data[start..start + self.row_len]
    }

    /// Mutable view of one row, the write target for a single sample.
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let start = row * self.row_len;
        &mut self.data[start..start + self.row_len]
    }

    /// Zero-copy view over the whole buffer.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            shape: &self.shape,
            data: &self.data,
        }
    }
}

/// Borrowed `(shape, data)` view of a dense buffer.
///
/// This is the form batches are published in: no copy is made, and the
/// borrow ties the view's lifetime to the buffer it came from, so a view
/// cannot outlive the fill that produced it.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    shape: &'a Shape,
    data: &'a [f32],
}

impl<'a> TensorView<'a> {
    /// Shape of the viewed buffer, leading (batch) dimension first.
    pub fn shape(&self) -> &Shape {
        self.shape
    }

    /// The underlying elements in row-major order.
    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    /// Read-only view of one row of the leading dimension.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &'a [f32] {
        let rows = self.shape.dims()[0];
        assert!(row < rows, "row {} out of range for shape {}", row, self.shape);
        let row_len = self.data.len() / rows;
        &self.data[row * row_len..(row + 1) * row_len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_geometry() {
        let buf = DenseBuffer::zeros(4, (3, 2, 2));
        assert_eq!(buf.shape().dims(), &[4, 3, 2, 2]);
        assert_eq!(buf.rows(), 4);
        assert_eq!(buf.row_len(), 12);
        assert!(buf.view().data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn row_write_then_view() {
        let mut buf = DenseBuffer::zeros(3, 2usize);
        buf.row_mut(1).copy_from_slice(&[5.0, 6.0]);
        assert_eq!(buf.row(0), &[0.0, 0.0]);
        assert_eq!(buf.row(1), &[5.0, 6.0]);

        let view = buf.view();
        assert_eq!(view.shape().dims(), &[3, 2]);
        assert_eq!(view.row(1), &[5.0, 6.0]);
        assert_eq!(view.data(), &[0.0, 0.0, 5.0, 6.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn row_out_of_range_panics() {
        let buf = DenseBuffer::zeros(2, 2usize);
        let _ = buf.row(2);
    }
}
