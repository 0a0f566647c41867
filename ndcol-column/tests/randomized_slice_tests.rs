//! Random sub-array writes through a column, checked against a plain
//! per-row copy of every cell.

use std::sync::Arc;

use ndcol_column::{ArrayColumn, ColumnDescriptor};
use ndcol_engine::MemEngine;
use ndcol_test_utils::init_tracing_for_tests;
use ndcol_types::{CellArray, ElementType, RowSelector, Slicer};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SHAPE: [u64; 3] = [3, 4, 2];
const ROWS: u64 = 8;

fn cell_offset(idx: [u64; 3]) -> usize {
    (idx[0] + SHAPE[0] * (idx[1] + SHAPE[1] * idx[2])) as usize
}

fn random_slicer(rng: &mut StdRng) -> Slicer {
    let mut start = [0u64; 3];
    let mut length = [0u64; 3];
    for axis in 0..3 {
        start[axis] = rng.gen_range(0..SHAPE[axis]);
        length[axis] = rng.gen_range(1..=SHAPE[axis] - start[axis]);
    }
    Slicer::new(start, length).unwrap()
}

/// Visit the box `slicer` with the first axis fastest.
fn for_each_index(slicer: &Slicer, mut f: impl FnMut([u64; 3])) {
    let s = slicer.start().dims();
    let l = slicer.length().dims();
    for k in 0..l[2] {
        for j in 0..l[1] {
            for i in 0..l[0] {
                f([s[0] + i, s[1] + j, s[2] + k]);
            }
        }
    }
}

#[test]
fn random_column_slices_match_shadow_cells() {
    init_tracing_for_tests();
    let mut rng = StdRng::seed_from_u64(0x5EED_C011);
    let col = ArrayColumn::new(
        ColumnDescriptor::fixed("R", ElementType::Int64, SHAPE),
        Arc::new(MemEngine::new()),
    )
    .unwrap();

    let cell_len = SHAPE.iter().product::<u64>() as usize;
    let mut shadow = vec![vec![0i64; cell_len]; ROWS as usize];
    for row in 0..ROWS {
        let values: Vec<i64> = (0..cell_len).map(|_| rng.gen_range(-1000..1000)).collect();
        shadow[row as usize].copy_from_slice(&values);
        col.put_array(row, &CellArray::new(SHAPE, values).unwrap())
            .unwrap();
    }

    for _ in 0..200 {
        let slicer = random_slicer(&mut rng);
        let first = rng.gen_range(0..ROWS);
        let last = rng.gen_range(first..ROWS);
        let rows = RowSelector::span(first, last).unwrap();
        let per_cell = slicer.length().product() as usize;

        if rng.gen_bool(0.5) {
            let count = (last - first + 1) as usize;
            let values: Vec<i64> = (0..per_cell * count)
                .map(|_| rng.gen_range(-1000..1000))
                .collect();
            let shape = slicer.length().with_trailing(count as u64);
            col.put_column_slice_cells(&rows, &slicer, &CellArray::new(shape, values.clone()).unwrap())
                .unwrap();

            let mut next = values.into_iter();
            for row in first..=last {
                for_each_index(&slicer, |idx| {
                    shadow[row as usize][cell_offset(idx)] = next.next().unwrap();
                });
            }
        } else {
            let got: CellArray<i64> = col.get_column_slice_cells(&rows, &slicer).unwrap();
            let mut expected = Vec::with_capacity(got.len());
            for row in first..=last {
                for_each_index(&slicer, |idx| {
                    expected.push(shadow[row as usize][cell_offset(idx)]);
                });
            }
            assert_eq!(got.as_slice(), expected.as_slice(), "rows {first}..={last}");
        }
    }

    for row in 0..ROWS {
        let got: CellArray<i64> = col.get_array(row).unwrap();
        assert_eq!(got.as_slice(), shadow[row as usize].as_slice(), "row {row}");

        let slicer = random_slicer(&mut rng);
        let one: CellArray<i64> = col.get_slice(row, &slicer).unwrap();
        let mut expected = Vec::new();
        for_each_index(&slicer, |idx| expected.push(shadow[row as usize][cell_offset(idx)]));
        assert_eq!(one.as_slice(), expected.as_slice());
    }
}
