use super::*;
use crate::layout::{box_positions, grown_extent};
use ndcol_result::Error;
use rustc_hash::FxHashMap;
use std::sync::RwLock;

struct MemVariable {
    type_code: u8,
    extent: Vec<u64>,
    data: ArrayBuffer,
}

impl MemVariable {
    fn info(&self, name: &str) -> VariableInfo {
        VariableInfo {
            name: name.to_string(),
            type_code: self.type_code,
            extent: self.extent.clone(),
        }
    }

    /// Re-lay the dense buffer out for a larger extent, keeping every
    /// existing element at its coordinates.
    fn grow_to(&mut self, extent: Vec<u64>) -> Result<()> {
        let element_type = self.data.element_type();
        let total: u64 = extent.iter().product();
        let mut data = ArrayBuffer::filled_default(element_type, total as usize);
        if !self.data.is_empty() {
            let old = Selection::from_pairs(
                &self.extent.iter().map(|&e| (0, e)).collect::<Vec<_>>(),
            );
            let positions = box_positions(&extent, &old)?;
            data.scatter(&positions, &self.data)?;
        }
        self.extent = extent;
        self.data = data;
        Ok(())
    }
}

/// In-memory engine used for tests/benchmarks.
///
/// Variables start with a zero extent and grow to cover every write. Reads
/// must stay inside the grown extent; elements never written read back as
/// the element type's default.
#[allow(clippy::module_name_repetitions)]
pub struct MemEngine {
    variables: RwLock<FxHashMap<String, MemVariable>>,
}

impl Default for MemEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemEngine {
    pub fn new() -> Self {
        Self {
            variables: RwLock::new(FxHashMap::default()),
        }
    }

    /// Names of every defined variable, sorted.
    pub fn variable_names(&self) -> Result<Vec<String>> {
        let map = self
            .variables
            .read()
            .map_err(|_| Error::Internal("MemEngine variables read lock poisoned".into()))?;
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl ArrayEngine for MemEngine {
    fn inquire_variable(&self, name: &str) -> Result<Option<VariableInfo>> {
        let map = self
            .variables
            .read()
            .map_err(|_| Error::Internal("MemEngine variables read lock poisoned".into()))?;
        Ok(map.get(name).map(|v| v.info(name)))
    }

    fn define_variable(
        &self,
        name: &str,
        element_type: ElementType,
        ndim: usize,
    ) -> Result<VariableInfo> {
        let mut map = self
            .variables
            .write()
            .map_err(|_| Error::Internal("MemEngine variables write lock poisoned".into()))?;
        let type_code = u8::from(element_type);
        if let Some(existing) = map.get(name) {
            if existing.type_code != type_code || existing.extent.len() != ndim {
                return Err(Error::InvalidArgumentError(format!(
                    "variable '{name}' already defined as {} with {} dimensions",
                    ElementType::from_code(existing.type_code)?,
                    existing.extent.len()
                )));
            }
            return Ok(existing.info(name));
        }

        tracing::trace!(variable = name, %element_type, ndim, "define variable");
        // A dimensionless variable holds exactly one value from the start.
        let extent = vec![0u64; ndim];
        let len = if ndim == 0 { 1 } else { 0 };
        let var = MemVariable {
            type_code,
            extent,
            data: ArrayBuffer::filled_default(element_type, len),
        };
        let info = var.info(name);
        map.insert(name.to_string(), var);
        Ok(info)
    }

    fn put(&self, name: &str, selection: &Selection, data: &ArrayBuffer) -> Result<()> {
        let mut map = self
            .variables
            .write()
            .map_err(|_| Error::Internal("MemEngine variables write lock poisoned".into()))?;
        let var = map.get_mut(name).ok_or(Error::NotFound)?;

        let var_type = ElementType::from_code(var.type_code)?;
        if data.element_type() != var_type {
            return Err(Error::type_mismatch(var_type, data.element_type()));
        }
        if data.len() as u64 != selection.element_count() {
            return Err(Error::InvalidArgumentError(format!(
                "put of {} elements into selection {selection} of {} elements",
                data.len(),
                selection.element_count()
            )));
        }

        let extent = grown_extent(&var.extent, selection)?;
        if extent != var.extent {
            tracing::trace!(variable = name, from = ?var.extent, to = ?extent, "grow variable");
            var.grow_to(extent)?;
        }
        let positions = box_positions(&var.extent, selection)?;
        var.data.scatter(&positions, data)
    }

    fn get(&self, name: &str, selection: &Selection) -> Result<ArrayBuffer> {
        let map = self
            .variables
            .read()
            .map_err(|_| Error::Internal("MemEngine variables read lock poisoned".into()))?;
        let var = map.get(name).ok_or(Error::NotFound)?;
        let positions = box_positions(&var.extent, selection)?;
        var.data.gather(&positions)
    }
}
