//! Failure modes of the TAP engine.
//!
//! Both structural variants are fatal: the engine routes them through
//! [`Tap::bail`](crate::Tap::bail) and terminates the process. They are
//! still surfaced as values so the context stack can be exercised in
//! isolation without killing the test process.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TapError {
    /// A subtest tried to push past the configured nesting bound.
    #[error("Too deep subtest nesting, the limit is {max} levels")]
    DepthExceeded { max: usize },

    /// `leave()` was called on the root level. Indicates a bug in the
    /// orchestration code, not in the caller's tests.
    #[error("Cannot leave the root test level")]
    RootUnderflow,

    /// A write to one of the output streams failed.
    #[error("Failed to write {stream} output: {source}")]
    Io {
        stream: &'static str,
        #[source]
        source: io::Error,
    },
}
