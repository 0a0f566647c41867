//! Translation of tabular addresses into engine selections.
//!
//! Engine variables carry a leading row dimension followed by the cell axes
//! in *reverse* tabular order: selection dimension `i >= 1` addresses tabular
//! axis `rank - i`. Cells keep their first axis varying fastest, which is the
//! engine's row-major order over the reversed axes, so no data is transposed.

use ndcol_engine::{DimSelection, Selection};
use ndcol_result::{Error, Result};
use ndcol_types::{RowRange, Shape, Slicer};

/// The part of each addressed cell a request covers.
#[derive(Copy, Clone, Debug)]
pub enum CellRegion<'a> {
    /// Every element of a cell of this shape.
    Whole(&'a Shape),
    /// A dense sub-array.
    Slice(&'a Slicer),
}

impl CellRegion<'_> {
    fn ndim(&self) -> usize {
        match self {
            CellRegion::Whole(shape) => shape.ndim(),
            CellRegion::Slice(slicer) => slicer.ndim(),
        }
    }

    /// `(start, count)` along tabular `axis`.
    fn axis(&self, axis: usize) -> (u64, u64) {
        match self {
            CellRegion::Whole(shape) => (0, shape[axis]),
            CellRegion::Slice(slicer) => (slicer.start()[axis], slicer.length()[axis]),
        }
    }
}

/// Builds selections for the cells of a column of fixed rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelectionTranslator {
    rank: usize,
}

impl SelectionTranslator {
    pub fn new(rank: usize) -> Self {
        Self { rank }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Selection covering `region` of every cell in `rows`.
    ///
    /// The result always has `rank + 1` dimensions.
    pub fn translate(&self, rows: RowRange, region: CellRegion<'_>) -> Result<Selection> {
        if region.ndim() != self.rank {
            return Err(Error::InvalidArgumentError(format!(
                "cell region of {} axes for column of rank {}",
                region.ndim(),
                self.rank
            )));
        }
        let mut dims = Vec::with_capacity(self.rank + 1);
        dims.push(DimSelection::new(rows.start, rows.count));
        for i in 1..=self.rank {
            let (start, count) = region.axis(self.rank - i);
            dims.push(DimSelection::new(start, count));
        }
        let selection = Selection::new(dims);
        tracing::trace!(
            row_start = rows.start,
            row_count = rows.count,
            %selection,
            "translated cell address"
        );
        Ok(selection)
    }

    /// Selection of scalar cells in `rows`; only valid for rank 0.
    pub fn scalar(&self, rows: RowRange) -> Result<Selection> {
        self.translate(rows, CellRegion::Whole(&Shape::scalar()))
    }

    /// Whole cells of `shape` in `rows`.
    pub fn whole_cells(&self, rows: RowRange, shape: &Shape) -> Result<Selection> {
        self.translate(rows, CellRegion::Whole(shape))
    }

    /// Sub-arrays `slicer` of the cells in `rows`.
    pub fn sliced_cells(&self, rows: RowRange, slicer: &Slicer) -> Result<Selection> {
        self.translate(rows, CellRegion::Slice(slicer))
    }
}
