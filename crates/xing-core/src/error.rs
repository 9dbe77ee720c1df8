//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `XingError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while validating a run before it starts.
#[derive(Debug, Error, PartialEq)]
pub enum XingError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `xing-core`.
pub type XingResult<T> = Result<T, XingError>;
