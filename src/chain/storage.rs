//! Substrate storage key derivation.
//!
//! A map entry lives at
//! `twox128(pallet) ++ twox128(item) ++ blake2_128(key) ++ key`
//! (`Blake2_128Concat`), where `key` is the SCALE encoding of the map key.
//! Asset ids are `u128`, so every asset key is 32 + 16 + 16 bytes long and
//! the id can be read back from the final 16 bytes.

use std::hash::Hasher;

use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};
use codec::{Decode, Encode};
use twox_hash::XxHash64;

use super::ChainError;

const PREFIX_LEN: usize = 32;
const ASSET_KEY_LEN: usize = PREFIX_LEN + 16 + 16;

/// 128-bit xxHash: two 64-bit rounds with seeds 0 and 1, little endian.
#[must_use]
pub fn twox_128(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (seed, chunk) in (0u64..).zip(out.chunks_exact_mut(8)) {
        let mut hasher = XxHash64::with_seed(seed);
        hasher.write(data);
        chunk.copy_from_slice(&hasher.finish().to_le_bytes());
    }
    out
}

#[must_use]
pub fn blake2_128(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&Blake2b::<U16>::digest(data));
    out
}

/// Prefix shared by every entry of `pallet::item`.
#[must_use]
pub fn storage_prefix(pallet: &str, item: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(PREFIX_LEN);
    key.extend_from_slice(&twox_128(pallet.as_bytes()));
    key.extend_from_slice(&twox_128(item.as_bytes()));
    key
}

/// Full key of the `Blake2_128Concat` map entry for `asset_id`.
#[must_use]
pub fn asset_map_key(pallet: &str, item: &str, asset_id: u128) -> Vec<u8> {
    let encoded = asset_id.encode();
    let mut key = storage_prefix(pallet, item);
    key.extend_from_slice(&blake2_128(&encoded));
    key.extend_from_slice(&encoded);
    key
}

/// Recover the asset id from a full map key.
///
/// # Errors
///
/// Returns `MalformedKey` if the key is not exactly one asset-map key long.
pub fn asset_id_from_key(key: &[u8]) -> Result<u128, ChainError> {
    if key.len() != ASSET_KEY_LEN {
        return Err(ChainError::MalformedKey(format!("expected {ASSET_KEY_LEN} bytes, got {}", key.len())));
    }
    let mut tail = &key[ASSET_KEY_LEN - 16..];
    u128::decode(&mut tail).map_err(|e| ChainError::MalformedKey(e.to_string()))
}

/// `0x`-prefixed lowercase hex, the encoding JSON-RPC uses for bytes.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse `0x`-prefixed hex.
///
/// # Errors
///
/// Returns `Parse` if the string is not valid hex.
pub fn from_hex(raw: &str) -> Result<Vec<u8>, ChainError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits).map_err(|e| ChainError::Parse(format!("invalid hex '{raw}': {e}")))
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
