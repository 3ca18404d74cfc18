//! Review sessions: the static summary pages followed by the signer segment,
//! driven by one of two hosts.
//!
//! - `StepFlow` is the button-driven host. It has a fixed list of steps and
//!   splices the signer segment in between two delimiter steps using the
//!   sequential cursor.
//! - `IndexFlow` is the touch-driven host. It asks for pages by absolute
//!   index and serves signer pages from the flat index.
//!
//! Both show the same pages in the same order, apart from the opening page.

mod error;
mod index;
mod step;
mod summary;

pub use crate::error::*;
pub use crate::index::*;
pub use crate::step::*;
pub use crate::summary::*;

use signview_tx::Transaction;

/// User settings that change what a review shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSettings {
    pub scripts_allowed: bool,
}

impl ReviewSettings {
    /// True if `tx` must not be reviewed under these settings.
    pub fn blocks(&self, tx: &Transaction) -> bool {
        tx.is_arbitrary_script() && !self.scripts_allowed
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Approved,
    Rejected,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use signview_tx::{
        Asset, ECPOINT_LEN, MAINNET_MAGIC, PublicKey, ScriptHash, Signer, Transaction,
        TransactionKind, UINT160_LEN, WitnessScope,
    };

    pub fn signer(contracts: usize, groups: usize) -> Signer {
        Signer::new(
            ScriptHash([0xd7; UINT160_LEN]),
            WitnessScope::BY_ENTRY | WitnessScope::CONTRACTS,
        )
        .with_contracts(
            (0..contracts)
                .map(|i| ScriptHash([i as u8; UINT160_LEN]))
                .collect(),
        )
        .with_groups((0..groups).map(|i| PublicKey([i as u8; ECPOINT_LEN])).collect())
    }

    pub fn transaction(kind: TransactionKind, shape: &[(usize, usize)]) -> Transaction {
        Transaction {
            network_magic: MAINNET_MAGIC,
            system_fee: 123_456_789,
            network_fee: 5,
            valid_until_block: 4242,
            kind,
            signers: shape
                .iter()
                .map(|&(contracts, groups)| signer(contracts, groups))
                .collect(),
        }
    }

    pub fn transfer(shape: &[(usize, usize)]) -> Transaction {
        transaction(
            TransactionKind::Transfer {
                asset: Asset::Gas,
                destination: "NhsVB4etFffHjpLoj2ngVkkfvbtrhfzL4c".to_owned(),
                amount: 100_000_000,
            },
            shape,
        )
    }
}
