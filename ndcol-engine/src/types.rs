use std::fmt;

use ndcol_result::Result;
use ndcol_types::ElementType;

/// Start and count along one engine dimension.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DimSelection {
    pub start: u64,
    pub count: u64,
}

impl DimSelection {
    #[inline]
    pub const fn new(start: u64, count: u64) -> Self {
        Self { start, count }
    }

    /// One past the last index covered, `None` on overflow.
    #[inline]
    pub fn end(&self) -> Option<u64> {
        self.start.checked_add(self.count)
    }
}

/// A hyperrectangle in engine dimension order.
///
/// Engine order is row-major: the last dimension varies fastest. A selection
/// with no dimensions addresses the single value of a dimensionless variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    dims: Vec<DimSelection>,
}

impl Selection {
    pub fn new(dims: Vec<DimSelection>) -> Self {
        Self { dims }
    }

    /// The selection of a dimensionless variable.
    pub fn value() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn from_pairs(pairs: &[(u64, u64)]) -> Self {
        Self {
            dims: pairs
                .iter()
                .map(|&(start, count)| DimSelection { start, count })
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    #[inline]
    pub fn dims(&self) -> &[DimSelection] {
        &self.dims
    }

    #[inline]
    pub fn dim(&self, i: usize) -> DimSelection {
        self.dims[i]
    }

    pub fn starts(&self) -> Vec<u64> {
        self.dims.iter().map(|d| d.start).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.dims.iter().map(|d| d.count).collect()
    }

    /// Number of elements addressed.
    pub fn element_count(&self) -> u64 {
        self.dims.iter().map(|d| d.count).product()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{start: {:?}, count: {:?}}}", self.starts(), self.counts())
    }
}

/// What an engine knows about one variable.
///
/// `type_code` is the stable `ElementType` code; `extent` is the current
/// global size in engine dimension order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    pub type_code: u8,
    pub extent: Vec<u64>,
}

impl VariableInfo {
    pub fn element_type(&self) -> Result<ElementType> {
        ElementType::from_code(self.type_code)
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.extent.len()
    }
}
