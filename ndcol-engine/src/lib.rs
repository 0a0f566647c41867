//! The array engine seam.
//!
//! An engine stores named, typed, N-dimensional variables and moves data in
//! and out of them one hyperrectangle ([`Selection`]) at a time. The column
//! layer never sees an engine's storage format; it only names variables and
//! builds selections.
//!
//! [`MemEngine`](engine::MemEngine) keeps everything in memory and is used by
//! tests and benchmarks. [`InstrumentedEngine`](engine::InstrumentedEngine)
//! wraps any engine and counts the traffic that crosses the seam.

pub mod engine;
pub mod layout;
pub mod types;

pub use engine::{ArrayEngine, InstrumentedEngine, MemEngine};
pub use types::{DimSelection, Selection, VariableInfo};
