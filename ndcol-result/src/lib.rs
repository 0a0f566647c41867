//! Error types and result definitions for ndcol.
//!
//! Every ndcol crate returns [`Result<T>`], whose error variant is the single
//! [`Error`] enum defined here. Errors raised by an engine are wrapped at the
//! column layer so that the caller always learns which column and which row
//! the failing transfer targeted.
//!
//! # Error Categories
//!
//! - **Shape errors** ([`Error::ShapeUndefined`]): a variable-shaped cell was
//!   accessed before its shape was assigned
//! - **Addressing errors** ([`Error::UnsupportedMultiSlice`],
//!   [`Error::InvalidArgumentError`]): row selectors or slicers that cannot be
//!   expressed as one engine selection
//! - **Unsupported operations** ([`Error::NotImplemented`]): sliced access to
//!   text columns
//! - **Engine failures** ([`Error::EngineIo`]): the array engine rejected a
//!   transfer
//! - **Type errors** ([`Error::TypeMismatch`]): typed access against a column
//!   of another element type

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
