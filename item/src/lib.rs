//! Display items of the signer segment of a review.
//!
//! The signer segment is a flattened walk over a nested structure:
//!
//! ```text
//! transaction
//! └── signer i
//!     ├── index      "Signer"       "i+1 of N"
//!     ├── account    "Account"      hex
//!     ├── scope      "Scope"        label
//!     ├── contract j "Contract j+1 of N1"
//!     └── group j    "Group j+1 of N2"
//! ```
//!
//! `model` owns the order (`item_count`, `nth_item`), `admission` decides
//! whether a snapshot may be reviewed at all, and `render` turns one item
//! into bounded title/text.

mod admission;
mod model;
mod render;

pub use crate::admission::*;
pub use crate::model::*;
pub use crate::render::*;
