//! Address translation and whole-column slice transfers.
//!
//! Run:
//!   cargo bench --bench selection_bench

#![forbid(unsafe_code)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use ndcol_column::{ArrayColumn, ColumnDescriptor, SelectionTranslator};
use ndcol_engine::MemEngine;
use ndcol_types::{CellArray, ElementType, RowRange, RowSelector, Shape, Slicer};

const ROWS: u64 = 4_096;
const CELL: [u64; 2] = [16, 8];

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    let translator = SelectionTranslator::new(3);
    let shape = Shape::from([8, 8, 8]);
    let slicer = Slicer::new([1, 2, 3], [4, 4, 4]).unwrap();

    group.bench_function("whole_cells_rank3", |b| {
        b.iter(|| {
            let sel = translator
                .whole_cells(black_box(RowRange::single(17)), &shape)
                .unwrap();
            black_box(sel);
        })
    });
    group.bench_function("sliced_cells_rank3", |b| {
        b.iter(|| {
            let sel = translator
                .sliced_cells(black_box(RowRange { start: 3, count: 64 }), &slicer)
                .unwrap();
            black_box(sel);
        })
    });
    group.finish();
}

fn filled_column() -> ArrayColumn<MemEngine> {
    let col = ArrayColumn::new(
        ColumnDescriptor::fixed("B", ElementType::Float64, CELL),
        Arc::new(MemEngine::new()),
    )
    .unwrap();
    let len = (CELL[0] * CELL[1]) as usize;
    for row in 0..ROWS {
        let values: Vec<f64> = (0..len).map(|i| (row as usize * len + i) as f64).collect();
        col.put_array(row, &CellArray::new(CELL, values).unwrap())
            .unwrap();
    }
    col
}

fn bench_column_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_transfers_4k_rows");
    group.sample_size(20);

    group.bench_function("put_array_per_row", |b| {
        b.iter_batched(
            || {
                ArrayColumn::new(
                    ColumnDescriptor::fixed("B", ElementType::Float64, CELL),
                    Arc::new(MemEngine::new()),
                )
                .unwrap()
            },
            |col| {
                let cell = CellArray::new(CELL, vec![1.0f64; (CELL[0] * CELL[1]) as usize]).unwrap();
                for row in 0..ROWS {
                    col.put_array(row, &cell).unwrap();
                }
                black_box(col);
            },
            BatchSize::LargeInput,
        )
    });

    let col = filled_column();
    let rows = RowSelector::span(0, ROWS - 1).unwrap();
    let slicer = Slicer::new([4, 2], [8, 1]).unwrap();
    group.bench_function("get_column_slice_cells", |b| {
        b.iter(|| {
            let got: CellArray<f64> = col.get_column_slice_cells(&rows, &slicer).unwrap();
            black_box(got);
        })
    });
    group.bench_function("get_array_per_row", |b| {
        b.iter(|| {
            for row in 0..ROWS {
                let got: CellArray<f64> = col.get_array(row).unwrap();
                black_box(got);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_translate, bench_column_transfers);
criterion_main!(benches);
