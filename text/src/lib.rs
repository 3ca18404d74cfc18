//! Fixed-capacity text buffers and the formatters that write into them.
//!
//! Assumptions:
//! - A `BoundedText<N>` never holds more than `N` bytes and never allocates.
//! - Writes truncate instead of failing. A cut always lands on a UTF-8
//!   character boundary, and once a buffer has been truncated every later
//!   write is dropped, so the visible text is always a prefix of what the
//!   caller tried to write.
//! - Numeric formatting is the exception: `format_fixed_point` refuses to
//!   produce a partial number and reports `FormatError::Capacity` instead.

mod bounded;
mod fixed;
mod hex;

pub use crate::bounded::*;
pub use crate::fixed::*;
pub use crate::hex::*;
