use signview_item::{ItemKind, ReviewTx};
use tracing::trace;

/// Contract or group index of a list that has not been entered yet.
pub const NOT_ENTERED: i16 = -1;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Where the cursor sits inside the current signer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Start,
    Index,
    Account,
    Scope,
    Contracts,
    Groups,
    End,
}

/// Position of a sequential walk over the signer segment.
///
/// `contract_index` and `group_index` are `NOT_ENTERED` until their list is
/// entered, and are parked at the list length once it has been walked past.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CursorState {
    signer_index: usize,
    contract_index: i16,
    group_index: i16,
    phase: Phase,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            signer_index: 0,
            contract_index: NOT_ENTERED,
            group_index: NOT_ENTERED,
            phase: Phase::Start,
        }
    }
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signer_index(&self) -> usize {
        self.signer_index
    }

    pub fn contract_index(&self) -> i16 {
        self.contract_index
    }

    pub fn group_index(&self) -> i16 {
        self.group_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Step one item in `direction`.
    ///
    /// Returns `None` when there is no further item that way. At either end
    /// the call is idempotent: repeating it keeps returning `None`.
    pub fn advance(&mut self, review: &ReviewTx<'_>, direction: Direction) -> Option<ItemKind> {
        let item = match direction {
            Direction::Forward => self.forward(review),
            Direction::Backward => self.backward(review),
        };
        trace!(
            ?direction,
            signer = self.signer_index,
            contract = self.contract_index,
            group = self.group_index,
            phase = ?self.phase,
            ?item,
            "cursor advanced"
        );
        item
    }

    /// The item the cursor currently rests on, if any.
    pub fn current(&self, review: &ReviewTx<'_>) -> Option<ItemKind> {
        let signer = self.signer_index;
        let (contracts, groups) = list_lens(review, signer);
        match self.phase {
            Phase::Start | Phase::End => None,
            Phase::Index => Some(ItemKind::SignerIndex { signer }),
            Phase::Account => Some(ItemKind::SignerAccount { signer }),
            Phase::Scope => Some(ItemKind::SignerScope { signer }),
            Phase::Contracts => in_range(self.contract_index, contracts)
                .map(|contract| ItemKind::SignerContract { signer, contract }),
            Phase::Groups => in_range(self.group_index, groups)
                .map(|group| ItemKind::SignerGroup { signer, group }),
        }
    }

    fn forward(&mut self, review: &ReviewTx<'_>) -> Option<ItemKind> {
        let last_signer = review.signers().len().saturating_sub(1);

        // Crosses at most one signer boundary, since every signer has an index.
        loop {
            let signer = self.signer_index;
            let (contracts, groups) = list_lens(review, signer);

            match self.phase {
                Phase::Start => {
                    self.phase = Phase::Index;
                    return Some(ItemKind::SignerIndex { signer });
                }
                Phase::Index => {
                    self.phase = Phase::Account;
                    return Some(ItemKind::SignerAccount { signer });
                }
                Phase::Account => {
                    self.phase = Phase::Scope;
                    return Some(ItemKind::SignerScope { signer });
                }
                Phase::Scope | Phase::Contracts => {
                    self.phase = Phase::Contracts;
                    if self.contract_index + 1 < contracts {
                        self.contract_index += 1;
                        return Some(ItemKind::SignerContract {
                            signer,
                            contract: self.contract_index as usize,
                        });
                    }
                    self.contract_index = contracts;
                    self.phase = Phase::Groups;
                }
                Phase::Groups => {
                    if self.group_index + 1 < groups {
                        self.group_index += 1;
                        return Some(ItemKind::SignerGroup {
                            signer,
                            group: self.group_index as usize,
                        });
                    }
                    self.group_index = groups;
                    self.phase = Phase::End;
                }
                Phase::End => {
                    if signer >= last_signer {
                        return None;
                    }
                    self.signer_index += 1;
                    self.contract_index = NOT_ENTERED;
                    self.group_index = NOT_ENTERED;
                    self.phase = Phase::Start;
                }
            }
        }
    }

    fn backward(&mut self, review: &ReviewTx<'_>) -> Option<ItemKind> {
        loop {
            let signer = self.signer_index;

            match self.phase {
                Phase::Start => {
                    if signer == 0 {
                        return None;
                    }
                    self.signer_index -= 1;
                    let (contracts, groups) = list_lens(review, self.signer_index);
                    self.contract_index = contracts;
                    self.group_index = groups;
                    self.phase = Phase::End;
                }
                Phase::Index => {
                    self.phase = Phase::Start;
                    if signer == 0 {
                        return None;
                    }
                }
                Phase::Account => {
                    self.phase = Phase::Index;
                    return Some(ItemKind::SignerIndex { signer });
                }
                Phase::Scope => {
                    self.phase = Phase::Account;
                    return Some(ItemKind::SignerAccount { signer });
                }
                Phase::Contracts => {
                    if self.contract_index > 0 {
                        self.contract_index -= 1;
                        return Some(ItemKind::SignerContract {
                            signer,
                            contract: self.contract_index as usize,
                        });
                    }
                    self.contract_index = NOT_ENTERED;
                    self.phase = Phase::Scope;
                    return Some(ItemKind::SignerScope { signer });
                }
                Phase::Groups => {
                    if self.group_index > 0 {
                        self.group_index -= 1;
                        return Some(ItemKind::SignerGroup {
                            signer,
                            group: self.group_index as usize,
                        });
                    }
                    self.group_index = NOT_ENTERED;
                    self.phase = Phase::Contracts;
                }
                Phase::End => {
                    self.phase = Phase::Groups;
                }
            }
        }
    }
}

/// Contract and group counts of a signer, as cursor indices.
fn list_lens(review: &ReviewTx<'_>, signer: usize) -> (i16, i16) {
    let Some(signer) = review.signers().get(signer) else {
        debug_assert!(false, "cursor signer {signer} out of range");
        return (0, 0);
    };
    (
        to_index(signer.allowed_contracts.len()),
        to_index(signer.allowed_groups.len()),
    )
}

// Admission bounds list lengths far below i16::MAX.
fn to_index(len: usize) -> i16 {
    i16::try_from(len).unwrap_or(i16::MAX)
}

fn in_range(index: i16, len: i16) -> Option<usize> {
    (0..len).contains(&index).then_some(index as usize)
}
