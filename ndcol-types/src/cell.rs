use ndcol_result::{Error, Result};

use crate::shape::Shape;

/// A dense array value together with its shape.
///
/// Elements are stored with the first axis varying fastest, so element
/// `[i, j]` of a `[3, 4]` array lives at offset `i + 3 * j`.
#[derive(Clone, Debug, PartialEq)]
pub struct CellArray<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T> CellArray<T> {
    pub fn new(shape: impl Into<Shape>, data: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        if shape.product() != data.len() as u64 {
            return Err(Error::InvalidArgumentError(format!(
                "{} elements do not fill shape {shape}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at tabular position `index`, `None` if out of range.
    pub fn get(&self, index: &[u64]) -> Option<&T> {
        if index.len() != self.shape.ndim() {
            return None;
        }
        let mut offset = 0u64;
        let mut stride = 1u64;
        for (axis, &i) in index.iter().enumerate() {
            if i >= self.shape[axis] {
                return None;
            }
            offset += i * stride;
            stride *= self.shape[axis];
        }
        self.data.get(offset as usize)
    }
}

impl<T: Clone + Default> CellArray<T> {
    /// An array of `shape` filled with default values.
    pub fn filled(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let data = vec![T::default(); shape.product() as usize];
        Self { shape, data }
    }
}
