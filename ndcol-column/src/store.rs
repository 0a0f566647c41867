//! Session owning the engine handle and the columns bound to it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ndcol_engine::ArrayEngine;
use ndcol_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::column::{ArrayColumn, ColumnDescriptor};
use crate::text_codec::{DEFAULT_TEXT_DELIMITER, TextCodec};

/// Thin configuration for an [`ArrayStore`].
#[derive(Clone, Debug)]
pub struct ArrayStoreOptions {
    /// Token separating elements of encoded text cells. Must not occur in
    /// any stored text element.
    pub text_delimiter: String,
}

impl Default for ArrayStoreOptions {
    fn default() -> Self {
        Self {
            text_delimiter: DEFAULT_TEXT_DELIMITER.to_string(),
        }
    }
}

/// A storage session: one shared engine, one row count, many columns.
///
/// The engine lives as long as the store and every column created from it.
pub struct ArrayStore<E: ArrayEngine> {
    engine: Arc<E>,
    text: TextCodec,
    row_count: Arc<AtomicU64>,
    columns: FxHashMap<String, ArrayColumn<E>>,
}

impl<E> ArrayStore<E>
where
    E: ArrayEngine,
{
    pub fn open(engine: Arc<E>) -> Self {
        Self {
            engine,
            text: TextCodec::default(),
            row_count: Arc::new(AtomicU64::new(0)),
            columns: FxHashMap::default(),
        }
    }

    pub fn with_options(engine: Arc<E>, options: ArrayStoreOptions) -> Result<Self> {
        let text = TextCodec::new(options.text_delimiter)?;
        Ok(Self {
            text,
            ..Self::open(engine)
        })
    }

    #[inline]
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn row_count(&self) -> u64 {
        self.row_count.load(Ordering::Acquire)
    }

    /// Grow the session by `n` rows and return the new row count.
    pub fn add_rows(&self, n: u64) -> u64 {
        let total = self.row_count.fetch_add(n, Ordering::AcqRel) + n;
        tracing::debug!(added = n, total, "rows added");
        total
    }

    /// Create and register a column. Names are unique within a store.
    pub fn create_column(&mut self, descriptor: ColumnDescriptor) -> Result<&mut ArrayColumn<E>> {
        if self.columns.contains_key(&descriptor.name) {
            return Err(Error::InvalidArgumentError(format!(
                "column '{}' already exists",
                descriptor.name
            )));
        }
        let name = descriptor.name.clone();
        tracing::debug!(
            column = %name,
            element_type = %descriptor.element_type,
            ndim = descriptor.ndim,
            fixed = descriptor.fixed_shape.is_some(),
            "create column"
        );
        let column = ArrayColumn::with_session(
            descriptor,
            Arc::clone(&self.engine),
            self.text.clone(),
            Arc::clone(&self.row_count),
        )?;
        Ok(self.columns.entry(name).or_insert(column))
    }

    pub fn column(&self, name: &str) -> Result<&ArrayColumn<E>> {
        self.columns.get(name).ok_or(Error::NotFound)
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut ArrayColumn<E>> {
        self.columns.get_mut(name).ok_or(Error::NotFound)
    }

    /// Registered column names, sorted.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndcol_engine::MemEngine;
    use ndcol_types::ElementType;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut store = ArrayStore::open(Arc::new(MemEngine::new()));
        store
            .create_column(ColumnDescriptor::scalar("A", ElementType::Int32))
            .unwrap();
        assert!(store
            .create_column(ColumnDescriptor::scalar("A", ElementType::Float64))
            .is_err());
        assert!(matches!(store.column("B"), Err(Error::NotFound)));
        assert_eq!(store.column_names(), vec!["A"]);
    }

    #[test]
    fn columns_share_the_session_row_count() {
        let mut store = ArrayStore::open(Arc::new(MemEngine::new()));
        store
            .create_column(ColumnDescriptor::fixed("X", ElementType::Float64, [3, 4]))
            .unwrap();
        assert_eq!(store.add_rows(4), 4);
        assert_eq!(store.add_rows(2), 6);
        assert_eq!(store.column("X").unwrap().row_count(), 6);
    }

    #[test]
    fn options_configure_text_delimiter() {
        let options = ArrayStoreOptions {
            text_delimiter: ";;".into(),
        };
        let mut store = ArrayStore::with_options(Arc::new(MemEngine::new()), options).unwrap();
        let col = store
            .create_column(ColumnDescriptor::array("T", ElementType::Text, 1))
            .unwrap();
        assert_eq!(col.text_codec().delimiter(), ";;");

        let empty = ArrayStoreOptions {
            text_delimiter: String::new(),
        };
        assert!(ArrayStore::with_options(Arc::new(MemEngine::new()), empty).is_err());
    }
}
