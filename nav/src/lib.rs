//! Two ways to walk the signer segment of a review.
//!
//! Assumptions:
//! - Both navigators take an admitted `ReviewTx`, so there is at least one
//!   signer and every list is within the protocol limits.
//! - Only `FlatIndex` has a size cap (`MAX_ITEMS`). The cursor walks any
//!   admitted transaction.
//! - `CursorState` is the sequential walk: one step at a time in either
//!   direction, with no allocation and no table.
//! - `FlatIndex` is the random-access walk: the same order, precomputed.
//! - Walking a fresh cursor forward yields exactly `FlatIndex::iter()`.

mod cursor;
mod flat;

pub use crate::cursor::*;
pub use crate::flat::*;
