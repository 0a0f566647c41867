//! Text cells.
//!
//! Engines have no native variable-length text arrays, so a text cell is
//! flattened into one string: every element followed by the delimiter. Each
//! row is stored in its own dimensionless engine variable named after the
//! column and the row number.
//!
//! Format limitations:
//! - An element that itself contains the delimiter is not detected on
//!   encode and splits into extra tokens on decode.
//! - Row variable names are not unique. Column `A1` row 2 and column `A`
//!   row 12 both store into `A12`, and text column `T` row 0 occupies the
//!   name of a numeric column `T0`. Column names within one engine must
//!   avoid such prefixes.

use ndcol_result::{Error, Result};
use ndcol_types::{CellArray, Shape};

/// Delimiter used when no other is configured.
pub const DEFAULT_TEXT_DELIMITER: &str = "__NDCOL_TEXT_BARRIER__";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextCodec {
    delimiter: String,
}

impl Default for TextCodec {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_TEXT_DELIMITER.to_string(),
        }
    }
}

impl TextCodec {
    pub fn new(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(Error::InvalidArgumentError(
                "text delimiter must not be empty".into(),
            ));
        }
        Ok(Self { delimiter })
    }

    #[inline]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Engine variable holding the text of `row` of `column`.
    ///
    /// The plain concatenation is ambiguous; see the module docs.
    pub fn row_variable_name(column: &str, row: u64) -> String {
        format!("{column}{row}")
    }

    /// Concatenate `elements`, each terminated by the delimiter.
    pub fn encode<S: AsRef<str>>(&self, elements: &[S]) -> String {
        let capacity = elements
            .iter()
            .map(|e| e.as_ref().len() + self.delimiter.len())
            .sum();
        let mut out = String::with_capacity(capacity);
        for element in elements {
            out.push_str(element.as_ref());
            out.push_str(&self.delimiter);
        }
        out
    }

    /// Split `encoded` into a cell of `shape`, filling cells in order.
    ///
    /// Cells without a terminated token keep their empty value; surplus
    /// tokens are ignored.
    pub fn decode(&self, encoded: &str, shape: &Shape) -> CellArray<String> {
        let mut cell: CellArray<String> = CellArray::filled(shape.clone());
        let mut rest = encoded;
        for slot in cell.as_mut_slice() {
            match rest.find(&self.delimiter) {
                Some(found) => {
                    *slot = rest[..found].to_string();
                    rest = &rest[found + self.delimiter.len()..];
                }
                None => break,
            }
        }
        cell
    }
}
