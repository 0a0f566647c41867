//! Shared test harness for all `ArrayEngine` implementations.
//!
//! Verifies for any engine:
//! - Define/inquire: a defined variable is visible and redefinition is
//!   idempotent.
//! - Box round-trip: a hyperrectangle written at a non-zero offset reads back
//!   unchanged, and neighbouring elements are untouched.
//! - Read-after-write: an overwrite is observed by the very next read.
//! - Failures: unknown variables and out-of-extent reads are errors.

use ndcol_engine::{ArrayEngine, Selection};
use ndcol_result::{Error, Result};
use ndcol_types::{ArrayBuffer, ElementType};

pub fn run_define_inquire<E, F>(make: F)
where
    E: ArrayEngine,
    F: FnOnce() -> Result<E>,
{
    let engine = make().expect("open engine");
    assert!(!engine.has_variable("DATA").unwrap());

    let info = engine
        .define_variable("DATA", ElementType::Float64, 3)
        .expect("define");
    assert_eq!(info.ndim(), 3);
    assert_eq!(info.element_type().unwrap(), ElementType::Float64);
    assert!(engine.has_variable("DATA").unwrap());

    let again = engine
        .define_variable("DATA", ElementType::Float64, 3)
        .expect("redefine");
    assert_eq!(again, info);
}

pub fn run_box_roundtrip<E, F>(make: F)
where
    E: ArrayEngine,
    F: FnOnce() -> Result<E>,
{
    let engine = make().expect("open engine");
    engine
        .define_variable("V", ElementType::Int64, 3)
        .expect("define");

    // Fill rows 0..2 of a 2 x 3 x 4 variable with a ramp.
    let full = Selection::from_pairs(&[(0, 2), (0, 3), (0, 4)]);
    let ramp: Vec<i64> = (0..24).collect();
    engine
        .put("V", &full, &ArrayBuffer::Int64(ramp.clone()))
        .expect("put full");

    // Overwrite an interior 1 x 2 x 2 box.
    let inner = Selection::from_pairs(&[(1, 1), (1, 2), (2, 2)]);
    engine
        .put("V", &inner, &ArrayBuffer::Int64(vec![-1, -2, -3, -4]))
        .expect("put inner");

    let got = engine.get("V", &inner).expect("get inner");
    assert_eq!(got, ArrayBuffer::Int64(vec![-1, -2, -3, -4]));

    let ArrayBuffer::Int64(all) = engine.get("V", &full).expect("get full") else {
        panic!("wrong element type");
    };
    let mut expected = ramp;
    // Offsets of the interior box in a row-major 2 x 3 x 4 layout.
    for (offset, value) in [(18, -1), (19, -2), (22, -3), (23, -4)] {
        expected[offset] = value;
    }
    assert_eq!(all, expected);
}

pub fn run_read_after_write<E, F>(make: F)
where
    E: ArrayEngine,
    F: FnOnce() -> Result<E>,
{
    let engine = make().expect("open engine");
    engine
        .define_variable("S", ElementType::Bool, 1)
        .expect("define");
    let row = Selection::from_pairs(&[(7, 1)]);
    engine
        .put("S", &row, &ArrayBuffer::Bool(vec![true]))
        .expect("put");
    assert_eq!(engine.get("S", &row).unwrap(), ArrayBuffer::Bool(vec![true]));
    engine
        .put("S", &row, &ArrayBuffer::Bool(vec![false]))
        .expect("overwrite");
    assert_eq!(engine.get("S", &row).unwrap(), ArrayBuffer::Bool(vec![false]));
}

pub fn run_failures<E, F>(make: F)
where
    E: ArrayEngine,
    F: FnOnce() -> Result<E>,
{
    let engine = make().expect("open engine");
    let sel = Selection::from_pairs(&[(0, 1)]);
    assert!(matches!(engine.get("missing", &sel), Err(Error::NotFound)));
    assert!(engine
        .put("missing", &sel, &ArrayBuffer::UInt8(vec![1]))
        .is_err());

    engine
        .define_variable("U", ElementType::UInt16, 1)
        .expect("define");
    engine
        .put("U", &sel, &ArrayBuffer::UInt16(vec![9]))
        .expect("put");
    let past_end = Selection::from_pairs(&[(0, 2)]);
    assert!(engine.get("U", &past_end).is_err());
    assert!(engine
        .put("U", &sel, &ArrayBuffer::Int16(vec![9]))
        .is_err());
}
