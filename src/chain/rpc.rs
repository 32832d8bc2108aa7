//! Substrate JSON-RPC client over HTTPS.
//!
//! A connection is pinned to the best block hash read at connect time, so
//! all reads of one registry load observe the same chain state.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::location::AssetLocation;
use super::storage::{asset_id_from_key, asset_map_key, from_hex, storage_prefix, to_hex};
use super::types::{AssetDetails, AssetMetadata, decode_value};
use super::{ChainConnector, ChainError, ChainQuery, RegistryKind};
use crate::config::{DashboardConfig, RpcTimeouts};
use crate::network::Network;

/// Keys requested per `state_getKeysPaged` call.
const KEYS_PAGE_SIZE: u32 = 1000;
/// Keys per `state_queryStorageAt` batch.
const QUERY_BATCH_SIZE: usize = 200;

// =============================================================================
// CLIENT
// =============================================================================

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeouts: RpcTimeouts) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ChainError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into(), next_id: AtomicU64::new(1) })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `method` and decode its `result`.
    ///
    /// # Errors
    ///
    /// Transport, HTTP status, JSON-RPC error object, or result shape mismatch.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let request = RpcRequest { jsonrpc: "2.0", id: self.next_id.fetch_add(1, Ordering::Relaxed), method, params };
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ChainError::Request(e.to_string()))?;
        if status != 200 {
            return Err(ChainError::Status { status, body: text });
        }
        parse_rpc_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// One block's worth of `state_queryStorageAt` output.
#[derive(Debug, Deserialize)]
pub(crate) struct StorageChangeSet {
    pub changes: Vec<(String, Option<String>)>,
}

/// Parse a JSON-RPC response envelope.
///
/// A `null` result deserializes as `T`'s null form, so `Option<_>` results
/// (e.g. `state_getStorage` on an absent key) work naturally.
pub(crate) fn parse_rpc_response<T: DeserializeOwned>(text: &str) -> Result<T, ChainError> {
    let envelope: RpcResponse<Value> = serde_json::from_str(text).map_err(|e| ChainError::Parse(e.to_string()))?;
    if let Some(err) = envelope.error {
        return Err(ChainError::Rpc { code: err.code, message: err.message });
    }
    serde_json::from_value(envelope.result.unwrap_or(Value::Null)).map_err(|e| ChainError::Parse(e.to_string()))
}

/// Turn `state_queryStorageAt` output into `(asset_id, details)` pairs.
/// Keys whose value vanished between paging and querying are skipped.
pub(crate) fn parse_asset_changes(sets: Vec<StorageChangeSet>) -> Result<Vec<(u128, AssetDetails)>, ChainError> {
    let mut entries = Vec::new();
    for (key, value) in sets.into_iter().flat_map(|set| set.changes) {
        let Some(value) = value else {
            tracing::debug!(%key, "asset entry disappeared before query");
            continue;
        };
        let asset_id = asset_id_from_key(&from_hex(&key)?)?;
        let details = decode_value(&format!("asset details for {asset_id}"), &from_hex(&value)?)?;
        entries.push((asset_id, details));
    }
    Ok(entries)
}

// =============================================================================
// CONNECTOR
// =============================================================================

/// Opens `RpcChain` connections against the configured endpoints.
///
/// One `RpcClient` per network is built up front and shared by every
/// connection to that network, so the HTTP connection pool is reused.
pub struct RpcConnector {
    clients: HashMap<Network, Arc<RpcClient>>,
}

impl RpcConnector {
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(config: &DashboardConfig) -> Result<Self, ChainError> {
        let mut clients = HashMap::new();
        for network in Network::ALL {
            clients.insert(network, Arc::new(RpcClient::new(config.endpoint(network), config.timeouts)?));
        }
        Ok(Self { clients })
    }

    #[must_use]
    pub fn client(&self, network: Network) -> Option<&Arc<RpcClient>> {
        self.clients.get(&network)
    }
}

#[async_trait::async_trait]
impl ChainConnector for RpcConnector {
    async fn connect(&self, network: Network) -> Result<Arc<dyn ChainQuery>, ChainError> {
        let client = self
            .client(network)
            .cloned()
            .ok_or_else(|| ChainError::Request(format!("no endpoint configured for {network}")))?;
        let at: String = client.call("chain_getBlockHash", json!([])).await?;
        tracing::debug!(%network, url = client.url(), block = %at, "connected to node");
        Ok(Arc::new(RpcChain { client, at }))
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// A node connection pinned to block `at`.
pub struct RpcChain {
    client: Arc<RpcClient>,
    at: String,
}

impl RpcChain {
    async fn storage(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ChainError> {
        let value: Option<String> = self.client.call("state_getStorage", json!([to_hex(key), self.at])).await?;
        value.as_deref().map(from_hex).transpose()
    }

    async fn keys_with_prefix(&self, prefix: &[u8]) -> Result<Vec<String>, ChainError> {
        let prefix = to_hex(prefix);
        let mut keys: Vec<String> = Vec::new();
        loop {
            let start = keys.last().cloned();
            let page: Vec<String> = self
                .client
                .call("state_getKeysPaged", json!([prefix, KEYS_PAGE_SIZE, start, self.at]))
                .await?;
            let done = page.len() < KEYS_PAGE_SIZE as usize;
            keys.extend(page);
            if done {
                return Ok(keys);
            }
        }
    }
}

#[async_trait::async_trait]
impl ChainQuery for RpcChain {
    async fn asset_entries(&self, kind: RegistryKind) -> Result<Vec<(u128, AssetDetails)>, ChainError> {
        let keys = self.keys_with_prefix(&storage_prefix(kind.pallet(), "Asset")).await?;
        let mut entries = Vec::with_capacity(keys.len());
        for batch in keys.chunks(QUERY_BATCH_SIZE) {
            let sets: Vec<StorageChangeSet> =
                self.client.call("state_queryStorageAt", json!([batch, self.at])).await?;
            entries.extend(parse_asset_changes(sets)?);
        }
        Ok(entries)
    }

    async fn asset_metadata(&self, kind: RegistryKind, asset_id: u128) -> Result<AssetMetadata, ChainError> {
        match self.storage(&asset_map_key(kind.pallet(), "Metadata", asset_id)).await? {
            Some(bytes) => decode_value(&format!("metadata for {asset_id}"), &bytes),
            None => Ok(AssetMetadata::default()),
        }
    }

    async fn asset_location(&self, asset_id: u128) -> Result<AssetLocation, ChainError> {
        let bytes = self
            .storage(&asset_map_key("AssetManager", "AssetIdType", asset_id))
            .await?
            .ok_or(ChainError::MissingEntry { item: "multilocation", asset_id })?;
        decode_value(&format!("multilocation for {asset_id}"), &bytes)
    }
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
