//! Minimal array engine trait + in-memory implementation.
//!
//! Every transfer is synchronous: `put` returns once the data is stored and
//! a `get` issued afterwards observes it.

use crate::types::{Selection, VariableInfo};
use ndcol_result::Result;
use ndcol_types::{ArrayBuffer, ElementType};

pub mod instrumented_engine;
pub use instrumented_engine::*;

pub mod mem_engine;
pub use mem_engine::*;

pub trait ArrayEngine: Send + Sync + 'static {
    /// Look up a variable by name.
    fn inquire_variable(&self, name: &str) -> Result<Option<VariableInfo>>;

    /// Define a variable with `ndim` dimensions and an empty extent.
    ///
    /// Defining a name that already exists with the same type and rank
    /// returns the existing variable.
    fn define_variable(
        &self,
        name: &str,
        element_type: ElementType,
        ndim: usize,
    ) -> Result<VariableInfo>;

    /// Write `data` into `selection` of variable `name`.
    ///
    /// `data` holds `selection.element_count()` elements in row-major order.
    fn put(&self, name: &str, selection: &Selection, data: &ArrayBuffer) -> Result<()>;

    /// Read `selection` of variable `name` into a new buffer.
    fn get(&self, name: &str, selection: &Selection) -> Result<ArrayBuffer>;

    fn has_variable(&self, name: &str) -> Result<bool> {
        Ok(self.inquire_variable(name)?.is_some())
    }
}

/// Look up `name`, defining it on first use.
pub fn inquire_or_define<E: ArrayEngine + ?Sized>(
    engine: &E,
    name: &str,
    element_type: ElementType,
    ndim: usize,
) -> Result<VariableInfo> {
    match engine.inquire_variable(name)? {
        Some(info) => Ok(info),
        None => engine.define_variable(name, element_type, ndim),
    }
}
