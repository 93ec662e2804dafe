//! Errors raised behind the C boundary.
//!
//! None of these reach the caller: each export logs the error and returns
//! its sentinel (null, 0, or nothing).

use ocio_core::OcioError;
use thiserror::Error;

/// Result type for shim internals.
pub type ShimResult<T> = Result<T, ShimError>;

/// Failure inside an exported call.
#[derive(Debug, Error)]
pub enum ShimError {
    /// Config loading or processor construction failed.
    #[error(transparent)]
    Ocio(#[from] OcioError),

    /// A required pointer argument was null.
    #[error("{what} pointer is null")]
    NullArgument {
        /// Which argument.
        what: &'static str,
    },

    /// A name argument is not valid UTF-8.
    #[error("{what} is not valid UTF-8")]
    InvalidUtf8 {
        /// Which argument.
        what: &'static str,
    },

    /// The shim library could not be loaded or lacks an export.
    #[error("failed to load shim library: {0}")]
    Load(#[from] libloading::Error),
}
