use displaydoc::Display;
use signview_tx::{Signer, Transaction};
use thiserror::Error;
use tracing::debug;

use crate::total_item_count;

pub const MAX_SIGNERS: usize = 16;
pub const MAX_ALLOWED_CONTRACTS: usize = 16;
pub const MAX_ALLOWED_GROUPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Display)]
pub enum AdmissionError {
    /// Transaction has no signers
    NoSigners,

    /// Transaction has {count} signers, at most {max} are supported
    TooManySigners { count: usize, max: usize },

    /// Signer {signer} allows {count} contracts, at most {max} are supported
    TooManyContracts {
        signer: usize,
        count: usize,
        max: usize,
    },

    /// Signer {signer} allows {count} groups, at most {max} are supported
    TooManyGroups {
        signer: usize,
        count: usize,
        max: usize,
    },
}

/// A transaction that passed the size checks and may be shown for review.
///
/// Everything downstream (cursor, flat index, flows) takes a `ReviewTx`, so
/// the protocol limits are checked once, here. The total item count is not
/// capped: only the flat index has a fixed table.
#[derive(Debug, Clone, Copy)]
pub struct ReviewTx<'tx> {
    tx: &'tx Transaction,
    total_items: usize,
}

impl<'tx> ReviewTx<'tx> {
    pub fn admit(tx: &'tx Transaction) -> Result<Self, AdmissionError> {
        let signers = tx.signers.len();
        if signers == 0 {
            return Err(AdmissionError::NoSigners);
        }
        if signers > MAX_SIGNERS {
            return Err(AdmissionError::TooManySigners {
                count: signers,
                max: MAX_SIGNERS,
            });
        }

        for (index, signer) in tx.signers.iter().enumerate() {
            check_signer(index, signer)?;
        }

        let total_items = total_item_count(tx);
        debug!(signers, total_items, "admitted transaction for review");

        Ok(Self { tx, total_items })
    }

    pub fn transaction(&self) -> &'tx Transaction {
        self.tx
    }

    pub fn signers(&self) -> &'tx [Signer] {
        &self.tx.signers
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }
}

fn check_signer(index: usize, signer: &Signer) -> Result<(), AdmissionError> {
    let contracts = signer.allowed_contracts.len();
    if contracts > MAX_ALLOWED_CONTRACTS {
        return Err(AdmissionError::TooManyContracts {
            signer: index,
            count: contracts,
            max: MAX_ALLOWED_CONTRACTS,
        });
    }

    let groups = signer.allowed_groups.len();
    if groups > MAX_ALLOWED_GROUPS {
        return Err(AdmissionError::TooManyGroups {
            signer: index,
            count: groups,
            max: MAX_ALLOWED_GROUPS,
        });
    }

    Ok(())
}
