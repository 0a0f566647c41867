use ndcol_engine::engine::EngineStatsSnapshot;
use ndcol_engine::{ArrayEngine, InstrumentedEngine, MemEngine, Selection};
use ndcol_result::Result;
use ndcol_types::{ArrayBuffer, ElementType};

mod engine_harness;
use engine_harness::{run_box_roundtrip, run_define_inquire, run_failures, run_read_after_write};

fn make_instrumented() -> Result<InstrumentedEngine<MemEngine>> {
    ndcol_test_utils::init_tracing_for_tests();
    Ok(InstrumentedEngine::new(MemEngine::new()).0)
}

#[test]
fn instrumented_define_inquire() {
    run_define_inquire(make_instrumented);
}

#[test]
fn instrumented_box_roundtrip() {
    run_box_roundtrip(make_instrumented);
}

#[test]
fn instrumented_read_after_write() {
    run_read_after_write(make_instrumented);
}

#[test]
fn instrumented_failures() {
    run_failures(make_instrumented);
}

#[test]
fn counts_calls_elements_and_bytes() {
    let (engine, stats) = InstrumentedEngine::new(MemEngine::new());
    engine
        .define_variable("D", ElementType::Float64, 2)
        .unwrap();
    let before = stats.snapshot();

    let sel = Selection::from_pairs(&[(0, 1), (0, 4)]);
    engine
        .put("D", &sel, &ArrayBuffer::Float64(vec![1.0, 2.0, 3.0, 4.0]))
        .unwrap();
    engine.get("D", &sel).unwrap();
    let bad = Selection::from_pairs(&[(3, 1), (0, 4)]);
    assert!(engine.get("D", &bad).is_err());

    let delta = stats.snapshot().delta_since(&before);
    assert_eq!(
        delta,
        EngineStatsSnapshot {
            gets: 2,
            puts: 1,
            elements_read: 4,
            elements_written: 4,
            bytes_read: 32,
            bytes_written: 32,
            failed_gets: 1,
            ..Default::default()
        }
    );
    assert_eq!(delta.transfers(), 3);

    stats.reset();
    assert_eq!(stats.snapshot(), EngineStatsSnapshot::default());
}
