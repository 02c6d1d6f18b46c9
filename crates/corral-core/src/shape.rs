use std::fmt;

// Shape — N-dimensional buffer geometry
//
// A Shape describes the size of each dimension of a dense buffer.
// For example:
//   - Label row:  Shape([10])          — 1 dimension, 10 elements
//   - Image row:  Shape([3, 32, 32])   — 3 dimensions, 3072 elements
//   - Batch:      Shape([64, 3, 32, 32]) — row shape with a leading batch dim
//
// The shape determines how many elements a buffer holds (product of all
// dims) and the row-major strides used to address slots within it.

/// N-dimensional shape of a dense buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a new shape from a vector of dimension sizes.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape(dims)
    }

    /// The dimension sizes as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of dimensions (0 for scalar, 1 for vector, 2 for matrix, etc.).
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements (product of all dimensions).
    /// A scalar shape [] has 1 element.
    pub fn elem_count(&self) -> usize {
        self.0.iter().product::<usize>().max(1)
    }

    /// Compute the contiguous (row-major / C-order) strides for this shape.
    ///
    /// For shape [2, 3, 4], strides are [12, 4, 1]: the last dimension is
    /// contiguous, and each step in an earlier dimension jumps over one
    /// full block of the later ones.
    pub fn stride_contiguous(&self) -> Vec<usize> {
        let mut strides = vec![0usize; self.rank()];
        if self.rank() > 0 {
            strides[self.rank() - 1] = 1;
            for i in (0..self.rank() - 1).rev() {
                strides[i] = strides[i + 1] * self.0[i + 1];
            }
        }
        strides
    }

    /// Size of a specific dimension.
    pub fn dim(&self, d: usize) -> crate::Result<usize> {
        self.0.get(d).copied().ok_or(crate::Error::DimOutOfRange {
            dim: d,
            rank: self.rank(),
        })
    }

    /// Prepend a leading dimension, e.g. turn a row shape [3, 32, 32] into
    /// the batched shape [64, 3, 32, 32].
    pub fn prepend(&self, dim: usize) -> Shape {
        let mut dims = Vec::with_capacity(self.rank() + 1);
        dims.push(dim);
        dims.extend_from_slice(&self.0);
        Shape(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

// Convenient From implementations
// These let you write: Shape::from((3, 4)) instead of Shape::new(vec![3, 4])

impl From<usize> for Shape {
    /// 1-D shape.
    fn from(d: usize) -> Self {
        Shape(vec![d])
    }
}

impl From<(usize, usize)> for Shape {
    fn from((d0, d1): (usize, usize)) -> Self {
        Shape(vec![d0, d1])
    }
}

impl From<(usize, usize, usize)> for Shape {
    fn from((d0, d1, d2): (usize, usize, usize)) -> Self {
        Shape(vec![d0, d1, d2])
    }
}

impl From<(usize, usize, usize, usize)> for Shape {
    fn from((d0, d1, d2, d3): (usize, usize, usize, usize)) -> Self {
        Shape(vec![d0, d1, d2, d3])
    }
}

impl From<Vec<usize>> for Shape {
    fn from(v: Vec<usize>) -> Self {
        Shape(v)
    }
}

impl From<&[usize]> for Shape {
    fn from(s: &[usize]) -> Self {
        Shape(s.to_vec())
    }
}

impl From<[usize; 3]> for Shape {
    fn from(s: [usize; 3]) -> Self {
        Shape(s.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elem_count_and_strides() {
        let s = Shape::from((2, 3, 4));
        assert_eq!(s.rank(), 3);
        assert_eq!(s.elem_count(), 24);
        assert_eq!(s.stride_contiguous(), vec![12, 4, 1]);
    }

    #[test]
    fn prepend_batch_dim() {
        let row = Shape::from((3, 32, 32));
        let batched = row.prepend(64);
        assert_eq!(batched.dims(), &[64, 3, 32, 32]);
        assert_eq!(batched.to_string(), "[64, 3, 32, 32]");
    }

    #[test]
    fn dim_out_of_range() {
        let s = Shape::from(5usize);
        assert_eq!(s.dim(0).unwrap(), 5);
        assert!(s.dim(1).is_err());
    }
}
