//! Typed cell access for one column.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use ndcol_engine::engine::inquire_or_define;
use ndcol_engine::{ArrayEngine, Selection};
use ndcol_result::{Error, Result};
use ndcol_types::{
    ArrayBuffer, CellArray, Element, ElementType, RowRange, RowSelector, Shape, Slicer,
};

use crate::row_range::single_range;
use crate::selection::SelectionTranslator;
use crate::shape_registry::ShapeRegistry;
use crate::text_codec::TextCodec;

/// What the table layer declares about a column when creating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub element_type: ElementType,
    /// Number of cell axes; 0 for scalar columns.
    pub ndim: usize,
    /// Shape shared by every row, if the column is fixed-shape.
    pub fixed_shape: Option<Shape>,
}

impl ColumnDescriptor {
    pub fn scalar(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            ndim: 0,
            fixed_shape: None,
        }
    }

    /// A variable-shape array column with cells of `ndim` axes.
    pub fn array(name: impl Into<String>, element_type: ElementType, ndim: usize) -> Self {
        Self {
            name: name.into(),
            element_type,
            ndim,
            fixed_shape: None,
        }
    }

    /// A fixed-shape array column.
    pub fn fixed(
        name: impl Into<String>,
        element_type: ElementType,
        shape: impl Into<Shape>,
    ) -> Self {
        let shape = shape.into();
        Self {
            name: name.into(),
            element_type,
            ndim: shape.ndim(),
            fixed_shape: Some(shape),
        }
    }
}

/// A column whose cells live in one engine variable.
///
/// Numeric cells of row `r` occupy `[r, reversed cell axes...]` of the
/// variable named after the column; the variable is defined on first write.
/// Text cells live in per-row variables, see [`TextCodec`].
///
/// Every get/put issues exactly one synchronous engine call. Shape updates
/// take `&mut self`; the owner serializes access to a column.
pub struct ArrayColumn<E: ArrayEngine> {
    name: String,
    element_type: ElementType,
    shapes: ShapeRegistry,
    translator: SelectionTranslator,
    engine: Arc<E>,
    text: TextCodec,
    row_count: Arc<AtomicU64>,
    bound: AtomicBool,
}

impl<E> ArrayColumn<E>
where
    E: ArrayEngine,
{
    /// Create a standalone column with the default text codec and no rows.
    pub fn new(descriptor: ColumnDescriptor, engine: Arc<E>) -> Result<Self> {
        Self::with_session(
            descriptor,
            engine,
            TextCodec::default(),
            Arc::new(AtomicU64::new(0)),
        )
    }

    pub(crate) fn with_session(
        descriptor: ColumnDescriptor,
        engine: Arc<E>,
        text: TextCodec,
        row_count: Arc<AtomicU64>,
    ) -> Result<Self> {
        let ColumnDescriptor {
            name,
            element_type,
            ndim,
            fixed_shape,
        } = descriptor;
        if name.is_empty() {
            return Err(Error::InvalidArgumentError(
                "column name must not be empty".into(),
            ));
        }

        let mut shapes = ShapeRegistry::new(ndim);
        match fixed_shape {
            Some(shape) => shapes.set_fixed_shape(shape)?,
            // Scalar cells all share the empty shape.
            None if ndim == 0 => shapes.set_fixed_shape(Shape::scalar())?,
            None => {}
        }

        Ok(Self {
            name,
            element_type,
            shapes,
            translator: SelectionTranslator::new(ndim),
            engine,
            text,
            row_count,
            bound: AtomicBool::new(false),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shapes.ndim()
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    #[inline]
    pub fn text_codec(&self) -> &TextCodec {
        &self.text
    }

    /// Rows in the owning session.
    pub fn row_count(&self) -> u64 {
        self.row_count.load(Ordering::Acquire)
    }

    // ----------------------------------------------------------------------
    // Shapes
    // ----------------------------------------------------------------------

    pub fn set_fixed_shape(&mut self, shape: impl Into<Shape>) -> Result<()> {
        self.shapes.set_fixed_shape(shape.into())
    }

    pub fn set_row_shape(&mut self, row: u64, shape: impl Into<Shape>) -> Result<()> {
        self.shapes.set_row_shape(row, shape.into())
    }

    pub fn shape(&self, row: u64) -> Option<&Shape> {
        self.shapes.shape(row)
    }

    pub fn is_shape_defined(&self, row: u64) -> bool {
        self.shapes.is_shape_defined(row)
    }

    pub fn can_change_shape(&self) -> bool {
        self.shapes.can_change_shape()
    }

    // ----------------------------------------------------------------------
    // Scalar cells
    // ----------------------------------------------------------------------

    pub fn put_scalar<T: Element>(&self, row: u64, value: T) -> Result<()> {
        self.check_element::<T>()?;
        self.check_scalar("put_scalar")?;
        let rows = RowRange::single(row);
        let selection = self.translator.scalar(rows)?;
        self.write(rows, &selection, vec![value])
    }

    pub fn get_scalar<T: Element>(&self, row: u64) -> Result<T> {
        self.check_element::<T>()?;
        self.check_scalar("get_scalar")?;
        let rows = RowRange::single(row);
        let selection = self.translator.scalar(rows)?;
        self.read::<T>(rows, &selection)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Internal(format!("engine returned no value for row {row}")))
    }

    /// Write one scalar per row of a contiguous row selection.
    pub fn put_scalar_column_cells<T: Element>(
        &self,
        rows: &RowSelector,
        values: &[T],
    ) -> Result<()> {
        self.check_element::<T>()?;
        self.check_scalar("put_scalar_column_cells")?;
        let range = single_range(rows, "put_scalar_column_cells")?;
        let selection = self.translator.scalar(range)?;
        self.write(range, &selection, values.to_vec())
    }

    pub fn get_scalar_column_cells<T: Element>(&self, rows: &RowSelector) -> Result<Vec<T>> {
        self.check_element::<T>()?;
        self.check_scalar("get_scalar_column_cells")?;
        let range = single_range(rows, "get_scalar_column_cells")?;
        let selection = self.translator.scalar(range)?;
        self.read(range, &selection)
    }

    // ----------------------------------------------------------------------
    // Whole array cells
    // ----------------------------------------------------------------------

    pub fn put_array<T: Element>(&self, row: u64, array: &CellArray<T>) -> Result<()> {
        self.check_element::<T>()?;
        let shape = self.shapes.require_shape(&self.name, row)?;
        check_array_shape(shape, array.shape())?;
        let rows = RowRange::single(row);
        let selection = self.translator.whole_cells(rows, shape)?;
        self.write(rows, &selection, array.as_slice().to_vec())
    }

    pub fn get_array<T: Element>(&self, row: u64) -> Result<CellArray<T>> {
        self.check_element::<T>()?;
        let shape = self.shapes.require_shape(&self.name, row)?;
        let rows = RowRange::single(row);
        let selection = self.translator.whole_cells(rows, shape)?;
        let values = self.read(rows, &selection)?;
        CellArray::new(shape.clone(), values)
    }

    // ----------------------------------------------------------------------
    // Sliced cells
    // ----------------------------------------------------------------------

    /// Write the sub-array `slicer` of one cell.
    pub fn put_slice<T: Element>(
        &self,
        row: u64,
        slicer: &Slicer,
        array: &CellArray<T>,
    ) -> Result<()> {
        self.check_element::<T>()?;
        self.put_sliced_range(RowRange::single(row), slicer, array, slicer.length().clone())
    }

    /// Read the sub-array `slicer` of one cell; the result has shape
    /// `slicer.length()`.
    pub fn get_slice<T: Element>(&self, row: u64, slicer: &Slicer) -> Result<CellArray<T>> {
        self.check_element::<T>()?;
        self.get_sliced_range(RowRange::single(row), slicer, slicer.length().clone())
    }

    /// Write the sub-array `slicer` of every cell in a contiguous row
    /// selection. `array` has shape `slicer.length()` plus a trailing row axis.
    pub fn put_column_slice_cells<T: Element>(
        &self,
        rows: &RowSelector,
        slicer: &Slicer,
        array: &CellArray<T>,
    ) -> Result<()> {
        self.check_element::<T>()?;
        let range = single_range(rows, "put_column_slice_cells")?;
        let shape = slicer.length().with_trailing(range.count);
        self.put_sliced_range(range, slicer, array, shape)
    }

    /// Read the sub-array `slicer` of every cell in a contiguous row
    /// selection, stacked along a trailing row axis.
    pub fn get_column_slice_cells<T: Element>(
        &self,
        rows: &RowSelector,
        slicer: &Slicer,
    ) -> Result<CellArray<T>> {
        self.check_element::<T>()?;
        let range = single_range(rows, "get_column_slice_cells")?;
        let shape = slicer.length().with_trailing(range.count);
        self.get_sliced_range(range, slicer, shape)
    }

    /// Like [`put_column_slice_cells`](Self::put_column_slice_cells) over
    /// every row of the session.
    pub fn put_column_slice<T: Element>(&self, slicer: &Slicer, array: &CellArray<T>) -> Result<()> {
        self.check_element::<T>()?;
        let count = self.row_count();
        let shape = slicer.length().with_trailing(count);
        if count == 0 {
            return check_array_shape(&shape, array.shape());
        }
        self.put_sliced_range(RowRange { start: 0, count }, slicer, array, shape)
    }

    /// Like [`get_column_slice_cells`](Self::get_column_slice_cells) over
    /// every row of the session.
    pub fn get_column_slice<T: Element>(&self, slicer: &Slicer) -> Result<CellArray<T>> {
        self.check_element::<T>()?;
        let count = self.row_count();
        let shape = slicer.length().with_trailing(count);
        if count == 0 {
            return CellArray::new(shape, Vec::new());
        }
        self.get_sliced_range(RowRange { start: 0, count }, slicer, shape)
    }

    fn put_sliced_range<T: Element>(
        &self,
        rows: RowRange,
        slicer: &Slicer,
        array: &CellArray<T>,
        expected: Shape,
    ) -> Result<()> {
        check_array_shape(&expected, array.shape())?;
        self.check_slice_rows(rows, slicer)?;
        let selection = self.translator.sliced_cells(rows, slicer)?;
        self.write(rows, &selection, array.as_slice().to_vec())
    }

    fn get_sliced_range<T: Element>(
        &self,
        rows: RowRange,
        slicer: &Slicer,
        shape: Shape,
    ) -> Result<CellArray<T>> {
        self.check_slice_rows(rows, slicer)?;
        let selection = self.translator.sliced_cells(rows, slicer)?;
        let values = self.read(rows, &selection)?;
        CellArray::new(shape, values)
    }

    // ----------------------------------------------------------------------
    // Text cells
    // ----------------------------------------------------------------------

    pub fn put_text(&self, row: u64, value: &str) -> Result<()> {
        self.check_text()?;
        self.check_scalar("put_text")?;
        self.write_text(row, value.to_string())
    }

    /// Text of a scalar text cell; empty if the row was never written.
    pub fn get_text(&self, row: u64) -> Result<String> {
        self.check_text()?;
        self.check_scalar("get_text")?;
        self.read_text(row)
    }

    pub fn put_text_array(&self, row: u64, array: &CellArray<String>) -> Result<()> {
        self.check_text()?;
        let shape = self.shapes.require_shape(&self.name, row)?;
        check_array_shape(shape, array.shape())?;
        let encoded = self.text.encode(array.as_slice());
        self.write_text(row, encoded)
    }

    /// Text array of one cell; cells never written read back empty.
    pub fn get_text_array(&self, row: u64) -> Result<CellArray<String>> {
        self.check_text()?;
        let shape = self.shapes.require_shape(&self.name, row)?.clone();
        let encoded = self.read_text(row)?;
        Ok(self.text.decode(&encoded, &shape))
    }

    pub fn put_text_scalar_column_cells(&self, _rows: &RowSelector, _values: &[String]) -> Result<()> {
        self.text_unsupported("put_text_scalar_column_cells")
    }

    pub fn get_text_scalar_column_cells(&self, _rows: &RowSelector) -> Result<Vec<String>> {
        self.text_unsupported("get_text_scalar_column_cells")
    }

    pub fn put_text_slice(&self, _row: u64, _slicer: &Slicer, _array: &CellArray<String>) -> Result<()> {
        self.text_unsupported("put_text_slice")
    }

    pub fn get_text_slice(&self, _row: u64, _slicer: &Slicer) -> Result<CellArray<String>> {
        self.text_unsupported("get_text_slice")
    }

    pub fn put_text_column_slice_cells(
        &self,
        _rows: &RowSelector,
        _slicer: &Slicer,
        _array: &CellArray<String>,
    ) -> Result<()> {
        self.text_unsupported("put_text_column_slice_cells")
    }

    pub fn get_text_column_slice_cells(
        &self,
        _rows: &RowSelector,
        _slicer: &Slicer,
    ) -> Result<CellArray<String>> {
        self.text_unsupported("get_text_column_slice_cells")
    }

    pub fn put_text_column_slice(&self, _slicer: &Slicer, _array: &CellArray<String>) -> Result<()> {
        self.text_unsupported("put_text_column_slice")
    }

    pub fn get_text_column_slice(&self, _slicer: &Slicer) -> Result<CellArray<String>> {
        self.text_unsupported("get_text_column_slice")
    }

    // ----------------------------------------------------------------------
    // Engine plumbing
    // ----------------------------------------------------------------------

    /// Bind the column variable, defining it on the first write.
    fn bind_variable(&self, row: u64) -> Result<()> {
        if self.bound.load(Ordering::Acquire) {
            return Ok(());
        }
        let info = inquire_or_define(
            self.engine.as_ref(),
            &self.name,
            self.element_type,
            self.ndim() + 1,
        )
        .map_err(|e| Error::engine_io(&self.name, row, e))?;
        let stored = info.element_type()?;
        if stored != self.element_type || info.ndim() != self.ndim() + 1 {
            tracing::warn!(
                column = %self.name,
                %stored,
                ndim = info.ndim(),
                "engine variable does not match column"
            );
            return Err(Error::type_mismatch(self.element_type, stored));
        }
        tracing::debug!(column = %self.name, extent = ?info.extent, "bound engine variable");
        self.bound.store(true, Ordering::Release);
        Ok(())
    }

    fn write<T: Element>(&self, rows: RowRange, selection: &Selection, values: Vec<T>) -> Result<()> {
        if values.len() as u64 != selection.element_count() {
            return Err(Error::InvalidArgumentError(format!(
                "{} values for {} addressed elements of column '{}'",
                values.len(),
                selection.element_count(),
                self.name
            )));
        }
        self.bind_variable(rows.start)?;
        let buffer = T::into_buffer(values);
        tracing::trace!(column = %self.name, %selection, "engine put");
        self.engine
            .put(&self.name, selection, &buffer)
            .map_err(|e| Error::engine_io(&self.name, rows.start, e))
    }

    fn read<T: Element>(&self, rows: RowRange, selection: &Selection) -> Result<Vec<T>> {
        tracing::trace!(column = %self.name, %selection, "engine get");
        let buffer = self
            .engine
            .get(&self.name, selection)
            .map_err(|e| Error::engine_io(&self.name, rows.start, e))?;
        if buffer.len() as u64 != selection.element_count() {
            return Err(Error::Internal(format!(
                "engine returned {} elements for selection {selection}",
                buffer.len()
            )));
        }
        T::from_buffer(buffer)
    }

    fn write_text(&self, row: u64, encoded: String) -> Result<()> {
        let variable = TextCodec::row_variable_name(&self.name, row);
        inquire_or_define(self.engine.as_ref(), &variable, ElementType::Text, 0)
            .map_err(|e| Error::engine_io(&self.name, row, e))?;
        tracing::trace!(column = %self.name, %variable, "engine put text");
        self.engine
            .put(&variable, &Selection::value(), &ArrayBuffer::Text(vec![encoded]))
            .map_err(|e| Error::engine_io(&self.name, row, e))
    }

    fn read_text(&self, row: u64) -> Result<String> {
        let variable = TextCodec::row_variable_name(&self.name, row);
        let present = self
            .engine
            .has_variable(&variable)
            .map_err(|e| Error::engine_io(&self.name, row, e))?;
        if !present {
            tracing::trace!(column = %self.name, %variable, "text row never written");
            return Ok(String::new());
        }
        let buffer = self
            .engine
            .get(&variable, &Selection::value())
            .map_err(|e| Error::engine_io(&self.name, row, e))?;
        match buffer {
            ArrayBuffer::Text(values) => values
                .into_iter()
                .next()
                .ok_or_else(|| Error::Internal(format!("text variable '{variable}' is empty"))),
            other => Err(Error::type_mismatch(ElementType::Text, other.element_type())),
        }
    }

    // ----------------------------------------------------------------------
    // Checks
    // ----------------------------------------------------------------------

    fn check_element<T: Element>(&self) -> Result<()> {
        if T::TYPE != self.element_type {
            return Err(Error::type_mismatch(self.element_type, T::TYPE));
        }
        Ok(())
    }

    fn check_text(&self) -> Result<()> {
        if !self.element_type.is_text() {
            return Err(Error::type_mismatch(self.element_type, ElementType::Text));
        }
        Ok(())
    }

    fn check_scalar(&self, operation: &str) -> Result<()> {
        if self.ndim() != 0 {
            return Err(Error::InvalidArgumentError(format!(
                "{operation} on column '{}' with {}-dimensional cells",
                self.name,
                self.ndim()
            )));
        }
        Ok(())
    }

    /// Every row in `rows` needs a shape that contains `slicer`.
    fn check_slice_rows(&self, rows: RowRange, slicer: &Slicer) -> Result<()> {
        if self.shapes.is_fixed() {
            let shape = self.shapes.require_shape(&self.name, rows.start)?;
            return slicer.check_within(shape);
        }
        let Some(last) = rows.last_row()? else {
            return Ok(());
        };
        for row in rows.start..=last {
            let shape = self.shapes.require_shape(&self.name, row)?;
            slicer.check_within(shape)?;
        }
        Ok(())
    }

    fn text_unsupported<R>(&self, operation: &str) -> Result<R> {
        self.check_text()?;
        Err(Error::not_implemented(operation))
    }
}

fn check_array_shape(expected: &Shape, actual: &Shape) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidArgumentError(format!(
            "array of shape {actual} where {expected} is addressed"
        )));
    }
    Ok(())
}
