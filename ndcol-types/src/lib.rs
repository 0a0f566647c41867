//! Core value types shared by the ndcol crates.
//!
//! - [`ElementType`] and [`ArrayBuffer`]: the runtime element tag and the
//!   tagged buffer that crosses the engine boundary.
//! - [`Element`]: compile-time view of a numeric element category.
//! - [`Shape`], [`Slicer`], [`CellArray`]: tabular cell geometry, with the
//!   first axis varying fastest.
//! - [`RowSelector`] and [`RowRange`]: row addressing.

pub mod buffer;
pub mod cell;
pub mod element;
pub mod rows;
pub mod shape;

pub use buffer::ArrayBuffer;
pub use cell::CellArray;
pub use element::{Complex32, Complex64, Element, ElementType};
pub use rows::{RowRange, RowSelector, RowSpan};
pub use shape::{Shape, Slicer};
