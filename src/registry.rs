//! Asset registry loading.
//!
//! DESIGN
//! ======
//! A registry load is a single awaited batch: entries are enumerated first,
//! then every entry is enriched through a bounded, order-preserving stream
//! (`buffered`), so no record is built before its base fields exist. For
//! external assets the metadata and multilocation lookups of one record run
//! concurrently and both must finish before the record is built.
//!
//! ORDERING
//! ========
//! External records sort ascending by parachain origin with `Relay` last,
//! then the last record moves to the front so the relay-native asset leads
//! the table. Local records keep enumeration order before the same move.
//! Picker options are taken before sorting and stay in enumeration order.

use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::address::{AccountId20, derived_address};
use crate::chain::location::ParachainOrigin;
use crate::chain::types::AssetDetails;
use crate::chain::{ChainConnector, ChainError, ChainQuery, RegistryKind};
use crate::network::Network;

// =============================================================================
// TYPES
// =============================================================================

/// One token's on-chain details joined with its display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub asset_id: u128,
    pub info: AssetDetails,
    pub derived_address: AccountId20,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Present for external assets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parachain_origin: Option<ParachainOrigin>,
}

/// Entry for the asset picker: `key`/`value` are the decimal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub key: String,
    pub text: String,
    pub value: String,
}

impl From<&AssetRecord> for DropdownOption {
    fn from(record: &AssetRecord) -> Self {
        let id = record.asset_id.to_string();
        Self { key: id.clone(), text: format!("{} - {}", record.name, record.derived_address), value: id }
    }
}

/// All records of one kind on one network.
///
/// `records` are in display order; `options` are in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub kind: RegistryKind,
    pub records: Vec<AssetRecord>,
    pub options: Vec<DropdownOption>,
}

impl Registry {
    /// Build from records in enumeration order: options first, then sort.
    #[must_use]
    pub fn from_enumerated(kind: RegistryKind, mut records: Vec<AssetRecord>) -> Self {
        let options = records.iter().map(DropdownOption::from).collect();
        sort_for_display(&mut records, kind);
        Self { kind, records, options }
    }
}

// =============================================================================
// LOAD
// =============================================================================

/// Open a connection for `network` and load the `kind` registry from it.
///
/// # Errors
///
/// Any connection, lookup, or decode failure; the first one aborts the load.
pub async fn load_registry(
    connector: &dyn ChainConnector,
    network: Network,
    kind: RegistryKind,
    concurrency: usize,
) -> Result<Registry, ChainError> {
    let chain = connector.connect(network).await?;
    let registry = build_registry(chain.as_ref(), kind, concurrency).await?;
    tracing::info!(%network, kind = kind.as_str(), count = registry.records.len(), "registry loaded");
    Ok(registry)
}

/// Enumerate and enrich the `kind` registry from an open connection.
///
/// # Errors
///
/// Any lookup or decode failure.
pub async fn build_registry(
    chain: &dyn ChainQuery,
    kind: RegistryKind,
    concurrency: usize,
) -> Result<Registry, ChainError> {
    let entries = chain.asset_entries(kind).await?;
    tracing::debug!(kind = kind.as_str(), entries = entries.len(), "enumerated registry");

    let records: Vec<AssetRecord> = futures::stream::iter(entries)
        .map(|(asset_id, info)| enrich(chain, kind, asset_id, info))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(Registry::from_enumerated(kind, records))
}

async fn enrich(
    chain: &dyn ChainQuery,
    kind: RegistryKind,
    asset_id: u128,
    info: AssetDetails,
) -> Result<AssetRecord, ChainError> {
    let (metadata, parachain_origin) = match kind {
        RegistryKind::External => {
            let (metadata, location) =
                tokio::try_join!(chain.asset_metadata(kind, asset_id), chain.asset_location(asset_id))?;
            (metadata, Some(location.parachain_origin()))
        }
        RegistryKind::Local => (chain.asset_metadata(kind, asset_id).await?, None),
    };

    Ok(AssetRecord {
        asset_id,
        info,
        derived_address: derived_address(asset_id),
        name: metadata.name(),
        symbol: metadata.symbol(),
        decimals: metadata.decimals,
        parachain_origin,
    })
}

/// Sort by origin (external only; stable), then move the last record first.
pub fn sort_for_display(records: &mut [AssetRecord], kind: RegistryKind) {
    if kind == RegistryKind::External {
        records.sort_by_key(|r| r.parachain_origin.unwrap_or(ParachainOrigin::Relay));
    }
    if !records.is_empty() {
        records.rotate_right(1);
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
