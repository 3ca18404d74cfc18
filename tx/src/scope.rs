use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Witness scope of a signer, as the raw Neo N3 scope byte.
///
/// `NONE` and `GLOBAL` are sentinels; the remaining flags combine.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScopeFlag>", into = "Vec<ScopeFlag>")]
pub struct WitnessScope(u8);

impl WitnessScope {
    pub const NONE: Self = Self(0x00);
    pub const BY_ENTRY: Self = Self(0x01);
    pub const CONTRACTS: Self = Self(0x10);
    pub const GROUPS: Self = Self(0x20);
    pub const GLOBAL: Self = Self(0x80);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    pub const fn is_global(self) -> bool {
        self.0 == Self::GLOBAL.0
    }

    /// True if every bit of `flag` is set. `NONE` is never contained.
    pub const fn contains(self, flag: Self) -> bool {
        flag.0 != 0 && self.0 & flag.0 == flag.0
    }
}

impl BitOr for WitnessScope {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeFlag {
    ByEntry,
    Contracts,
    Groups,
    Global,
}

impl ScopeFlag {
    const ALL: [ScopeFlag; 4] = [
        ScopeFlag::ByEntry,
        ScopeFlag::Contracts,
        ScopeFlag::Groups,
        ScopeFlag::Global,
    ];

    pub fn scope(self) -> WitnessScope {
        match self {
            ScopeFlag::ByEntry => WitnessScope::BY_ENTRY,
            ScopeFlag::Contracts => WitnessScope::CONTRACTS,
            ScopeFlag::Groups => WitnessScope::GROUPS,
            ScopeFlag::Global => WitnessScope::GLOBAL,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Global witness scope cannot be combined with other flags")]
    GlobalCombined,
}

impl TryFrom<Vec<ScopeFlag>> for WitnessScope {
    type Error = ScopeError;

    fn try_from(flags: Vec<ScopeFlag>) -> Result<Self, Self::Error> {
        let scope = flags
            .into_iter()
            .fold(WitnessScope::NONE, |scope, flag| scope | flag.scope());
        if scope.contains(WitnessScope::GLOBAL) && !scope.is_global() {
            return Err(ScopeError::GlobalCombined);
        }
        Ok(scope)
    }
}

impl From<WitnessScope> for Vec<ScopeFlag> {
    fn from(scope: WitnessScope) -> Self {
        ScopeFlag::ALL
            .into_iter()
            .filter(|flag| scope.contains(flag.scope()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels() {
        assert!(WitnessScope::NONE.is_none());
        assert!(WitnessScope::GLOBAL.is_global());
        assert!(!WitnessScope::NONE.contains(WitnessScope::NONE));
    }

    #[test]
    fn combined_flags() {
        let scope = WitnessScope::BY_ENTRY | WitnessScope::GROUPS;
        assert_eq!(scope.bits(), 0x21);
        assert!(scope.contains(WitnessScope::BY_ENTRY));
        assert!(scope.contains(WitnessScope::GROUPS));
        assert!(!scope.contains(WitnessScope::CONTRACTS));
    }

    #[test]
    fn from_json_flags() {
        let scope: WitnessScope = serde_json::from_str(r#"["ByEntry", "Contracts"]"#).unwrap();
        assert_eq!(scope, WitnessScope::BY_ENTRY | WitnessScope::CONTRACTS);

        let none: WitnessScope = serde_json::from_str("[]").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn global_stands_alone() {
        let global: WitnessScope = serde_json::from_str(r#"["Global"]"#).unwrap();
        assert!(global.is_global());

        let error = serde_json::from_str::<WitnessScope>(r#"["Global", "ByEntry"]"#).unwrap_err();
        assert!(error.to_string().contains("Global witness scope"));
        assert_eq!(
            WitnessScope::try_from(vec![ScopeFlag::ByEntry, ScopeFlag::Global]),
            Err(ScopeError::GlobalCombined)
        );
    }

    #[test]
    fn to_json_flags() {
        let json = serde_json::to_string(&WitnessScope::GLOBAL).unwrap();
        assert_eq!(json, r#"["Global"]"#);
    }
}
