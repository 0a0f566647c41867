use crate::error::Error;

/// Result type alias used throughout ndcol.
pub type Result<T> = std::result::Result<T, Error>;
