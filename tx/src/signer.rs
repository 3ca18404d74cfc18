use serde::{Deserialize, Serialize};

use crate::{PublicKey, ScriptHash, WitnessScope};

/// A transaction signer and the permissions its witness grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub account: ScriptHash,
    #[serde(default)]
    pub scope: WitnessScope,
    #[serde(default)]
    pub allowed_contracts: Vec<ScriptHash>,
    #[serde(default)]
    pub allowed_groups: Vec<PublicKey>,
}

impl Signer {
    pub fn new(account: ScriptHash, scope: WitnessScope) -> Self {
        Self {
            account,
            scope,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
        }
    }

    pub fn with_contracts(mut self, contracts: Vec<ScriptHash>) -> Self {
        self.allowed_contracts = contracts;
        self
    }

    pub fn with_groups(mut self, groups: Vec<PublicKey>) -> Self {
        self.allowed_groups = groups;
        self
    }
}
