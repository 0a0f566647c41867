//! Row selector validation.
//!
//! An engine selection covers one box, so a multi-row request can only be
//! served in a single call when its rows are contiguous. Selectors with
//! several spans are rejected instead of being split into several calls.

use ndcol_result::{Error, Result};
use ndcol_types::{RowRange, RowSelector};

/// The single contiguous row range described by `rows`.
///
/// `operation` names the caller in the error raised for multi-span
/// selectors.
pub fn single_range(rows: &RowSelector, operation: &str) -> Result<RowRange> {
    let mut spans = rows.spans().iter();
    let first = spans.next().ok_or_else(|| {
        Error::InvalidArgumentError(format!("{operation}: empty row selector"))
    })?;
    if spans.next().is_some() {
        return Err(Error::unsupported_multi_slice(operation));
    }
    RowRange::try_from(*first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndcol_types::RowSpan;

    #[test]
    fn accepts_one_span() {
        let range = single_range(&RowSelector::span(10, 14).unwrap(), "op").unwrap();
        assert_eq!(range, RowRange { start: 10, count: 5 });

        let range = single_range(&RowSelector::single(3), "op").unwrap();
        assert_eq!(range, RowRange { start: 3, count: 1 });
    }

    #[test]
    fn consecutive_rows_form_one_range() {
        let range = single_range(&RowSelector::from_rows(&[4, 5, 6, 7]), "op").unwrap();
        assert_eq!(range, RowRange { start: 4, count: 4 });
    }

    #[test]
    fn rejects_disjoint_spans_naming_the_operation() {
        let rows = RowSelector::from_spans(vec![
            RowSpan::new(0, 1).unwrap(),
            RowSpan::new(5, 6).unwrap(),
        ]);
        let err = single_range(&rows, "get_column_slice_cells").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedMultiSlice { ref operation } if operation == "get_column_slice_cells"
        ));

        let gap = RowSelector::from_rows(&[1, 3]);
        assert!(matches!(
            single_range(&gap, "op"),
            Err(Error::UnsupportedMultiSlice { .. })
        ));
    }

    #[test]
    fn rejects_empty_selector() {
        assert!(matches!(
            single_range(&RowSelector::default(), "op"),
            Err(Error::InvalidArgumentError(_))
        ));
    }
}
