//! ndcol: array-valued table columns over an N-dimensional array engine.
//!
//! This crate is the entrypoint for the ndcol workspace. It re-exports the
//! column layer, the engine seam and the shared value types.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ndcol::{ArrayStore, CellArray, ColumnDescriptor, ElementType, MemEngine};
//!
//! let mut store = ArrayStore::open(Arc::new(MemEngine::new()));
//! let col = store
//!     .create_column(ColumnDescriptor::fixed("DATA", ElementType::Float64, [3, 4]))
//!     .unwrap();
//! let cell = CellArray::new([3, 4], (0..12).map(f64::from).collect()).unwrap();
//! col.put_array(5, &cell).unwrap();
//! assert_eq!(col.get_array::<f64>(5).unwrap(), cell);
//! ```
//!
//! # Architecture
//!
//! - **Columns** (`ndcol-column`): shape bookkeeping, address translation,
//!   typed and text cell access, and the [`ArrayStore`] session.
//! - **Engine** (`ndcol-engine`): the [`engine::ArrayEngine`] trait plus
//!   in-memory and instrumented implementations.
//! - **Types** (`ndcol-types`): element tags, buffers, shapes, slicers and
//!   row selectors.

pub use ndcol_column::{
    ArrayColumn, ArrayStore, ArrayStoreOptions, ColumnDescriptor, DEFAULT_TEXT_DELIMITER,
    SelectionTranslator, ShapeRegistry, TextCodec,
};

pub use ndcol_types::{
    ArrayBuffer, CellArray, Complex32, Complex64, Element, ElementType, RowRange, RowSelector,
    RowSpan, Shape, Slicer,
};

pub use ndcol_engine::MemEngine;

pub mod engine {
    //! The array engine seam and its implementations.

    pub use ndcol_engine::engine::{EngineStats, EngineStatsSnapshot, inquire_or_define};
    pub use ndcol_engine::{
        ArrayEngine, DimSelection, InstrumentedEngine, MemEngine, Selection, VariableInfo,
    };
}

pub use ndcol_result::{Error, Result};
