//! Parsed transaction snapshots, as handed to the review screen.
//!
//! A snapshot is immutable for the whole review session. Byte-level parsing
//! happens elsewhere; here snapshots are built in memory or loaded from
//! JSON, with byte fields written as hex strings.

mod bytes;
mod scope;
mod signer;
mod transaction;

pub use crate::bytes::*;
pub use crate::scope::*;
pub use crate::signer::*;
pub use crate::transaction::*;
