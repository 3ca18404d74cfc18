use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PublicKey, Signer};

pub const MAINNET_MAGIC: u32 = 860833102;
pub const TESTNET_MAGIC: u32 = 894710606;

/// Decimals of GAS amounts, including both fees.
pub const GAS_DECIMALS: u8 = 8;

#[derive(Error, Debug)]
pub enum TxError {
    #[error("failed to parse transaction json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Neo,
    Gas,
}

impl Asset {
    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Neo => "NEO",
            Asset::Gas => "GAS",
        }
    }

    pub fn decimals(self) -> u8 {
        match self {
            Asset::Neo => 0,
            Asset::Gas => GAS_DECIMALS,
        }
    }
}

/// What the transaction script does, as recognised by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer {
        asset: Asset,
        destination: String,
        amount: u64,
    },
    Vote {
        /// `None` retracts the current vote.
        #[serde(default)]
        to: Option<PublicKey>,
    },
    Script,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    MainNet,
    TestNet,
    Private(u32),
}

impl From<u32> for Network {
    fn from(magic: u32) -> Self {
        match magic {
            MAINNET_MAGIC => Network::MainNet,
            TESTNET_MAGIC => Network::TestNet,
            other => Network::Private(other),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::MainNet => write!(f, "MainNet"),
            Network::TestNet => write!(f, "TestNet"),
            Network::Private(magic) => write!(f, "{magic}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub network_magic: u32,
    pub system_fee: u64,
    pub network_fee: u64,
    pub valid_until_block: u32,
    pub kind: TransactionKind,
    pub signers: Vec<Signer>,
}

impl Transaction {
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn network(&self) -> Network {
        Network::from(self.network_magic)
    }

    /// A script that is neither a recognised transfer nor a vote.
    pub fn is_arbitrary_script(&self) -> bool {
        matches!(self.kind, TransactionKind::Script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WitnessScope;

    const TRANSFER: &str = r#"{
        "network_magic": 860833102,
        "system_fee": 456,
        "network_fee": 789,
        "valid_until_block": 1,
        "kind": {
            "type": "transfer",
            "asset": "gas",
            "destination": "NhsVB4etFffHjpLoj2ngVkkfvbtrhfzL4c",
            "amount": 100000000
        },
        "signers": [
            {
                "account": "d7678dd97c000be3f33e9362e673101bac4ca654",
                "scope": ["ByEntry"]
            }
        ]
    }"#;

    #[test]
    fn parse_transfer() {
        let tx = Transaction::from_json(TRANSFER).unwrap();
        assert_eq!(tx.network(), Network::MainNet);
        assert!(matches!(
            tx.kind,
            TransactionKind::Transfer {
                asset: Asset::Gas,
                amount: 100_000_000,
                ..
            }
        ));
        assert_eq!(tx.signers.len(), 1);
        assert_eq!(tx.signers[0].scope, WitnessScope::BY_ENTRY);
        assert!(tx.signers[0].allowed_contracts.is_empty());
    }

    #[test]
    fn parse_vote_retract() {
        let json = r#"{
            "network_magic": 5,
            "system_fee": 0,
            "network_fee": 0,
            "valid_until_block": 9,
            "kind": { "type": "vote" },
            "signers": []
        }"#;
        let tx = Transaction::from_json(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Vote { to: None });
        assert_eq!(tx.network().to_string(), "5");
    }

    #[test]
    fn bad_account_is_an_error() {
        let json = TRANSFER.replace("d7678dd97c000be3f33e9362e673101bac4ca654", "zz");
        assert!(matches!(
            Transaction::from_json(&json),
            Err(TxError::Json(_))
        ));
    }

    #[test]
    fn global_mixed_with_flags_is_an_error() {
        let json = TRANSFER.replace(r#"["ByEntry"]"#, r#"["Global", "ByEntry"]"#);
        assert!(matches!(
            Transaction::from_json(&json),
            Err(TxError::Json(_))
        ));
    }

    #[test]
    fn network_names() {
        assert_eq!(Network::from(MAINNET_MAGIC).to_string(), "MainNet");
        assert_eq!(Network::from(TESTNET_MAGIC).to_string(), "TestNet");
        assert_eq!(Network::from(1234).to_string(), "1234");
    }
}
