use signview_item::{ItemKind, ReviewTx, nth_item};
use thiserror::Error;
use tracing::debug;

/// Rows in the flat index table.
pub const MAX_ITEMS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlatIndexError {
    #[error("{count} display items do not fit in a table of {max}")]
    Capacity { count: usize, max: usize },
    #[error("index {0} is out of bounds")]
    IndexOutOfBounds(usize),
}

/// The signer segment precomputed into a fixed table for O(1) lookup.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    items: [ItemKind; MAX_ITEMS],
    len: usize,
}

impl FlatIndex {
    pub fn build(review: &ReviewTx<'_>) -> Result<Self, FlatIndexError> {
        let count = review.total_items();
        if count > MAX_ITEMS {
            return Err(FlatIndexError::Capacity {
                count,
                max: MAX_ITEMS,
            });
        }

        let tx = review.transaction();
        let mut items = [ItemKind::SignerIndex { signer: 0 }; MAX_ITEMS];
        let mut len = 0;
        for (slot, item) in items
            .iter_mut()
            .zip((0..count).map_while(|index| nth_item(tx, index)))
        {
            *slot = item;
            len += 1;
        }

        debug!(count = len, "built flat index");

        Ok(Self { items, len })
    }

    pub fn get(&self, index: usize) -> Result<ItemKind, FlatIndexError> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(FlatIndexError::IndexOutOfBounds(index))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[ItemKind] {
        &self.items[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemKind> + '_ {
        self.as_slice().iter().copied()
    }
}
