//! Per-column cell shapes.

use ndcol_result::{Error, Result};
use ndcol_types::Shape;
use rustc_hash::FxHashMap;

/// Tracks the cell shape of every row of one column.
///
/// A column is either *fixed* (one shape shared by every row, per-row map
/// never populated) or *variable* (shapes assigned row by row, lazily).
/// Entries are overwritable but never removed.
#[derive(Clone, Debug)]
pub struct ShapeRegistry {
    ndim: usize,
    fixed: Option<Shape>,
    rows: FxHashMap<u64, Shape>,
}

impl ShapeRegistry {
    /// A variable-shape registry for cells of `ndim` axes.
    pub fn new(ndim: usize) -> Self {
        Self {
            ndim,
            fixed: None,
            rows: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// `true` iff the column was never marked fixed.
    #[inline]
    pub fn can_change_shape(&self) -> bool {
        self.fixed.is_none()
    }

    /// Mark the column fixed with `shape` for every row.
    pub fn set_fixed_shape(&mut self, shape: Shape) -> Result<()> {
        self.check_rank(&shape)?;
        if !self.rows.is_empty() {
            return Err(Error::InvalidArgumentError(format!(
                "cannot fix shape {shape}: {} rows already carry their own shape",
                self.rows.len()
            )));
        }
        self.fixed = Some(shape);
        Ok(())
    }

    /// Assign the shape of one row of a variable column.
    pub fn set_row_shape(&mut self, row: u64, shape: Shape) -> Result<()> {
        if let Some(fixed) = &self.fixed {
            return Err(Error::InvalidArgumentError(format!(
                "row {row}: column shape is fixed to {fixed}"
            )));
        }
        self.check_rank(&shape)?;
        self.rows.insert(row, shape);
        Ok(())
    }

    /// Shape of `row`, or `None` when a variable column has no shape for it.
    pub fn shape(&self, row: u64) -> Option<&Shape> {
        match &self.fixed {
            Some(fixed) => Some(fixed),
            None => self.rows.get(&row),
        }
    }

    /// Shape of `row`, signalling [`Error::ShapeUndefined`] when absent.
    pub fn require_shape(&self, column: &str, row: u64) -> Result<&Shape> {
        self.shape(row)
            .ok_or_else(|| Error::shape_undefined(column, row))
    }

    #[inline]
    pub fn is_shape_defined(&self, row: u64) -> bool {
        self.shape(row).is_some()
    }

    fn check_rank(&self, shape: &Shape) -> Result<()> {
        if shape.ndim() != self.ndim {
            return Err(Error::InvalidArgumentError(format!(
                "shape {shape} has {} axes, column cells have {}",
                shape.ndim(),
                self.ndim
            )));
        }
        Ok(())
    }
}
