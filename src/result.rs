use crate::error::Error as DerpiErr;

/// `Result` with this crate's [`Error`](crate::Error).
pub type Result<T> = std::result::Result<T, DerpiErr>;
