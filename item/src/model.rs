use signview_tx::{Signer, Transaction};

/// Items every signer shows regardless of its lists: index, account, scope.
pub const FIXED_ITEMS_PER_SIGNER: usize = 3;

/// One page of the signer segment, tagged with its owning signer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    SignerIndex { signer: usize },
    SignerAccount { signer: usize },
    SignerScope { signer: usize },
    SignerContract { signer: usize, contract: usize },
    SignerGroup { signer: usize, group: usize },
}

impl ItemKind {
    pub fn signer_index(&self) -> usize {
        match *self {
            ItemKind::SignerIndex { signer }
            | ItemKind::SignerAccount { signer }
            | ItemKind::SignerScope { signer }
            | ItemKind::SignerContract { signer, .. }
            | ItemKind::SignerGroup { signer, .. } => signer,
        }
    }
}

pub fn item_count(signer: &Signer) -> usize {
    FIXED_ITEMS_PER_SIGNER + signer.allowed_contracts.len() + signer.allowed_groups.len()
}

pub fn total_item_count(tx: &Transaction) -> usize {
    tx.signers.iter().map(item_count).sum()
}

/// Resolve a 0-based position in the flattened order.
///
/// Returns `None` when `global_index >= total_item_count(tx)`.
pub fn nth_item(tx: &Transaction, global_index: usize) -> Option<ItemKind> {
    let mut rest = global_index;

    for (signer_index, signer) in tx.signers.iter().enumerate() {
        let count = item_count(signer);
        if rest >= count {
            rest -= count;
            continue;
        }

        let contracts = signer.allowed_contracts.len();
        let item = match rest {
            0 => ItemKind::SignerIndex {
                signer: signer_index,
            },
            1 => ItemKind::SignerAccount {
                signer: signer_index,
            },
            2 => ItemKind::SignerScope {
                signer: signer_index,
            },
            offset if offset < FIXED_ITEMS_PER_SIGNER + contracts => ItemKind::SignerContract {
                signer: signer_index,
                contract: offset - FIXED_ITEMS_PER_SIGNER,
            },
            offset => ItemKind::SignerGroup {
                signer: signer_index,
                group: offset - FIXED_ITEMS_PER_SIGNER - contracts,
            },
        };
        return Some(item);
    }

    None
}
