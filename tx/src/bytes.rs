use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

pub const UINT160_LEN: usize = 20;
pub const ECPOINT_LEN: usize = 33;

macro_rules! hex_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

hex_bytes!(
    /// A 20-byte script hash: signer accounts and allowed contracts.
    ScriptHash,
    UINT160_LEN
);

hex_bytes!(
    /// A 33-byte compressed public key: allowed groups and vote targets.
    PublicKey,
    ECPOINT_LEN
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_script_hash() {
        let hash: ScriptHash = "d7678dd97c000be3f33e9362e673101bac4ca654".parse().unwrap();
        assert_eq!(hash.0[0], 0xd7);
        assert_eq!(hash.0[19], 0x54);
        assert_eq!(hash.to_string(), "d7678dd97c000be3f33e9362e673101bac4ca654");
    }

    #[test]
    fn parse_with_prefix() {
        let hash: ScriptHash = "0xd7678dd97c000be3f33e9362e673101bac4ca654".parse().unwrap();
        assert_eq!(hash.0[0], 0xd7);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!("d7678d".parse::<ScriptHash>().is_err());
        assert!("d7678dd97c000be3f33e9362e673101bac4ca654".parse::<PublicKey>().is_err());
    }

    #[test]
    fn json_string_roundtrip() {
        let key = PublicKey([0x02; ECPOINT_LEN]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "02".repeat(ECPOINT_LEN)));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
