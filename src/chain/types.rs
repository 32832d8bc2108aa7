//! SCALE-encoded storage values of the asset pallets.
//!
//! Layouts follow `pallet-assets` as deployed on Moonbeam: balances are
//! `u128`, accounts are `AccountId20`.

use codec::{Decode, Encode};
use serde::Serialize;

use crate::address::AccountId20;

/// Lifecycle status of an asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize)]
pub enum AssetStatus {
    Live,
    Frozen,
    Destroying,
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Live => "Live",
            Self::Frozen => "Frozen",
            Self::Destroying => "Destroying",
        };
        f.write_str(s)
    }
}

/// `Asset` map value: ownership, supply, and account counters.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize)]
pub struct AssetDetails {
    pub owner: AccountId20,
    pub issuer: AccountId20,
    pub admin: AccountId20,
    pub freezer: AccountId20,
    pub supply: u128,
    pub deposit: u128,
    pub min_balance: u128,
    pub is_sufficient: bool,
    pub accounts: u32,
    pub sufficients: u32,
    pub approvals: u32,
    pub status: AssetStatus,
}

/// `Metadata` map value. Absent entries read as `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct AssetMetadata {
    pub deposit: u128,
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    pub decimals: u8,
    pub is_frozen: bool,
}

impl AssetMetadata {
    #[must_use]
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    #[must_use]
    pub fn symbol(&self) -> String {
        String::from_utf8_lossy(&self.symbol).into_owned()
    }
}

/// Decode a storage value, naming `what` in the error.
///
/// # Errors
///
/// Returns `Decode` if the bytes do not match `T`'s layout.
pub fn decode_value<T: Decode>(what: &str, bytes: &[u8]) -> Result<T, super::ChainError> {
    let mut input = bytes;
    T::decode(&mut input).map_err(|e| super::ChainError::Decode { what: what.to_string(), reason: e.to_string() })
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
