//! 20-byte account display and XC-20 derived addresses.
//!
//! Moonbeam accounts are Ethereum-style `AccountId20`. They are shown in
//! EIP-55 mixed-case checksum form. An XC-20 precompile address is not stored
//! on chain; it is the fixed prefix `FF FF FF FE` followed by the asset id as
//! 16 big-endian bytes.

use codec::{Decode, Encode};
use serde::{Serialize, Serializer};
use sha3::{Digest, Keccak256};

/// Leading bytes of every derived XC-20 address.
pub const XC20_PREFIX: [u8; 4] = [0xff, 0xff, 0xff, 0xfe];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct AccountId20(pub [u8; 20]);

impl AccountId20 {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for AccountId20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_checksum(self.as_bytes()))
    }
}

impl std::fmt::Debug for AccountId20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountId20({self})")
    }
}

impl Serialize for AccountId20 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// XC-20 address for `asset_id`. Pure: the same id always yields the same address.
#[must_use]
pub fn derived_address(asset_id: u128) -> AccountId20 {
    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&XC20_PREFIX);
    bytes[4..].copy_from_slice(&asset_id.to_be_bytes());
    AccountId20(bytes)
}

/// EIP-55: uppercase each hex letter whose nibble in keccak(lower-hex) is >= 8.
#[must_use]
pub fn to_checksum(bytes: &[u8; 20]) -> String {
    let lower = hex::encode(bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
