//! Row-major offset arithmetic for hyperrectangles inside a variable.

use ndcol_result::{Error, Result};

use crate::types::Selection;

/// Flat row-major offsets of every element of `selection` inside a variable
/// of `extent`, in the order the elements appear in a transfer buffer.
///
/// The last dimension varies fastest. Fails if the selection has the wrong
/// rank or reaches past `extent`.
pub fn box_positions(extent: &[u64], selection: &Selection) -> Result<Vec<usize>> {
    if extent.len() != selection.len() {
        return Err(Error::InvalidArgumentError(format!(
            "selection of {} dimensions against variable of {}",
            selection.len(),
            extent.len()
        )));
    }
    for (axis, dim) in selection.dims().iter().enumerate() {
        if dim.end().is_none_or(|end| end > extent[axis]) {
            return Err(Error::InvalidArgumentError(format!(
                "selection {selection} outside variable extent {extent:?}"
            )));
        }
    }

    let total = selection.element_count() as usize;
    let mut out = Vec::with_capacity(total);
    if total == 0 {
        return Ok(out);
    }

    // Row-major strides of the variable.
    let ndim = extent.len();
    let mut strides = vec![1u64; ndim];
    for axis in (0..ndim.saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * extent[axis + 1];
    }

    // Odometer over the selection, last axis fastest.
    let mut cursor = vec![0u64; ndim];
    loop {
        let offset: u64 = (0..ndim)
            .map(|axis| (selection.dim(axis).start + cursor[axis]) * strides[axis])
            .sum();
        out.push(offset as usize);

        let mut axis = ndim;
        loop {
            if axis == 0 {
                return Ok(out);
            }
            axis -= 1;
            cursor[axis] += 1;
            if cursor[axis] < selection.dim(axis).count {
                break;
            }
            cursor[axis] = 0;
        }
    }
}

/// Component-wise maximum of `extent` and the end of `selection`.
pub fn grown_extent(extent: &[u64], selection: &Selection) -> Result<Vec<u64>> {
    if extent.len() != selection.len() {
        return Err(Error::InvalidArgumentError(format!(
            "selection of {} dimensions against variable of {}",
            selection.len(),
            extent.len()
        )));
    }
    extent
        .iter()
        .zip(selection.dims())
        .map(|(&cur, dim)| {
            dim.end()
                .map(|end| cur.max(end))
                .ok_or_else(|| Error::InvalidArgumentError(format!("selection {selection} overflows")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensionless_selection_is_single_offset() {
        let pos = box_positions(&[], &Selection::value()).unwrap();
        assert_eq!(pos, vec![0]);
    }

    #[test]
    fn last_axis_is_fastest() {
        // 2 x 3 variable, select the whole thing.
        let sel = Selection::from_pairs(&[(0, 2), (0, 3)]);
        let pos = box_positions(&[2, 3], &sel).unwrap();
        assert_eq!(pos, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn interior_box() {
        // 4 x 5 variable, rows 1..3, columns 2..4.
        let sel = Selection::from_pairs(&[(1, 2), (2, 2)]);
        let pos = box_positions(&[4, 5], &sel).unwrap();
        assert_eq!(pos, vec![7, 8, 12, 13]);
    }

    #[test]
    fn out_of_extent_is_rejected() {
        let sel = Selection::from_pairs(&[(3, 2)]);
        assert!(box_positions(&[4], &sel).is_err());
        let sel = Selection::from_pairs(&[(0, 1), (0, 1)]);
        assert!(box_positions(&[4], &sel).is_err());
    }

    #[test]
    fn zero_count_selects_nothing() {
        let sel = Selection::from_pairs(&[(0, 0), (0, 3)]);
        assert!(box_positions(&[2, 3], &sel).unwrap().is_empty());
    }

    #[test]
    fn grown_extent_takes_maximum() {
        let sel = Selection::from_pairs(&[(5, 1), (0, 2)]);
        assert_eq!(grown_extent(&[3, 4], &sel).unwrap(), vec![6, 4]);
    }
}
