//! Array-cell columns on top of an [`ArrayEngine`](ndcol_engine::ArrayEngine).
//!
//! A column stores one scalar or one N-dimensional array per row. Each access
//! is turned into a single engine [`Selection`](ndcol_engine::Selection):
//!
//! 1. [`row_range`] checks that the addressed rows form one contiguous run.
//! 2. [`shape_registry`] supplies the cell shape for the row(s).
//! 3. [`selection`] maps rows + cell region onto engine dimensions: a
//!    leading row dimension followed by the cell axes in reverse order.
//! 4. [`column::ArrayColumn`] issues exactly one synchronous engine put or get.
//!
//! Text cells cannot be stored natively by the engine and go through
//! [`text_codec`] instead, one engine variable per row.

pub mod column;
pub mod row_range;
pub mod selection;
pub mod shape_registry;
pub mod store;
pub mod text_codec;

pub use column::{ArrayColumn, ColumnDescriptor};
pub use ndcol_result::{Error, Result};
pub use row_range::single_range;
pub use selection::{CellRegion, SelectionTranslator};
pub use shape_registry::ShapeRegistry;
pub use store::{ArrayStore, ArrayStoreOptions};
pub use text_codec::{DEFAULT_TEXT_DELIMITER, TextCodec};
