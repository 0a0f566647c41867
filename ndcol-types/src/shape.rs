use std::fmt;
use std::ops::Index;

use ndcol_result::{Error, Result};

/// Extent of a tabular cell, one entry per axis, first axis varying fastest.
///
/// A rank-0 shape describes a scalar cell and holds exactly one element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(Vec<u64>);

impl Shape {
    pub fn new(dims: impl Into<Vec<u64>>) -> Self {
        Shape(dims.into())
    }

    pub fn scalar() -> Self {
        Shape(Vec::new())
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn dims(&self) -> &[u64] {
        &self.0
    }

    /// Number of elements in a cell of this shape.
    pub fn product(&self) -> u64 {
        self.0.iter().product()
    }

    /// This shape with one more axis appended as the slowest-varying one.
    pub fn with_trailing(&self, extent: u64) -> Shape {
        let mut dims = self.0.clone();
        dims.push(extent);
        Shape(dims)
    }
}

impl From<Vec<u64>> for Shape {
    fn from(dims: Vec<u64>) -> Self {
        Shape(dims)
    }
}

impl<const N: usize> From<[u64; N]> for Shape {
    fn from(dims: [u64; N]) -> Self {
        Shape(dims.to_vec())
    }
}

impl Index<usize> for Shape {
    type Output = u64;

    fn index(&self, axis: usize) -> &u64 {
        &self.0[axis]
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// A sub-array of a cell: per-axis start and length, in tabular axis order.
///
/// Strides are not part of the addressing model; every slice is a dense box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slicer {
    start: Shape,
    length: Shape,
}

impl Slicer {
    pub fn new(start: impl Into<Shape>, length: impl Into<Shape>) -> Result<Self> {
        let start = start.into();
        let length = length.into();
        if start.ndim() != length.ndim() {
            return Err(Error::InvalidArgumentError(format!(
                "slicer start {start} and length {length} differ in rank"
            )));
        }
        Ok(Self { start, length })
    }

    /// The slicer covering every element of a cell of `shape`.
    pub fn full(shape: &Shape) -> Self {
        Self {
            start: Shape(vec![0; shape.ndim()]),
            length: shape.clone(),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.start.ndim()
    }

    #[inline]
    pub fn start(&self) -> &Shape {
        &self.start
    }

    #[inline]
    pub fn length(&self) -> &Shape {
        &self.length
    }

    /// Check the slice lies inside a cell of `shape`.
    pub fn check_within(&self, shape: &Shape) -> Result<()> {
        if shape.ndim() != self.ndim() {
            return Err(Error::InvalidArgumentError(format!(
                "slicer of rank {} applied to cell shape {shape}",
                self.ndim()
            )));
        }
        for axis in 0..self.ndim() {
            let end = self.start[axis].checked_add(self.length[axis]);
            if end.is_none_or(|end| end > shape[axis]) {
                return Err(Error::InvalidArgumentError(format!(
                    "slice start {} length {} exceeds cell shape {shape}",
                    self.start, self.length
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_of_scalar_is_one() {
        assert_eq!(Shape::scalar().product(), 1);
        assert_eq!(Shape::from([3, 4]).product(), 12);
    }

    #[test]
    fn slicer_rank_must_agree() {
        assert!(Slicer::new([0, 0], [1]).is_err());
    }

    #[test]
    fn check_within_rejects_overrun() {
        let shape = Shape::from([4, 5]);
        let ok = Slicer::new([1, 2], [3, 3]).unwrap();
        assert!(ok.check_within(&shape).is_ok());
        let bad = Slicer::new([2, 0], [3, 1]).unwrap();
        assert!(bad.check_within(&shape).is_err());
        let wrong_rank = Slicer::new([0], [1]).unwrap();
        assert!(wrong_rank.check_within(&shape).is_err());
    }

    #[test]
    fn display_lists_dims() {
        assert_eq!(Shape::from([3, 4]).to_string(), "[3, 4]");
        assert_eq!(Shape::scalar().to_string(), "[]");
    }
}
