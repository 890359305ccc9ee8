//! tapkit: a small assertion engine that speaks the Test Anything Protocol.
//!
//! A [`Tap`] engine records boolean and typed checks, writes `ok` /
//! `not ok` lines to a protocol stream and comments to a diagnostic
//! stream, and supports nested subtests that each count as a single check
//! in their parent scope.
//!
//! ```
//! use tapkit::{BufferSink, Tap};
//!
//! let mut tap = Tap::with_sink(BufferSink::new());
//! tap.plan(2);
//! tap.is_int(2 + 2, 4, "arithmetic holds");
//! tap.is_str("tap", "tap", "strings compare byte for byte");
//!
//! assert!(tap.into_sink().protocol().ends_with("1..2\n"));
//! ```

pub use crate::context::{ContextStack, Plan, TestLevel, MAX_DEPTH};
pub use crate::engine::Tap;
pub use crate::error::TapError;
pub use crate::sink::{BufferSink, OutputSink, StandardSink};

mod compare;
pub mod context;
pub mod engine;
pub mod error;
pub mod sink;
