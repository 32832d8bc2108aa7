//! Chain access: the seam between the dashboard and a Moonbeam-family node.
//!
//! DESIGN
//! ======
//! `ChainConnector` opens a connection for one network; the returned
//! `ChainQuery` answers the three lookups the asset pipeline needs. The
//! concrete implementation speaks Substrate JSON-RPC over HTTPS (`rpc`), and
//! tests substitute in-memory mocks behind the same traits.

pub mod location;
pub mod rpc;
pub mod storage;
pub mod types;

use std::sync::Arc;

use serde::Serialize;

use crate::network::Network;
use location::AssetLocation;
use types::{AssetDetails, AssetMetadata};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while querying a node.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The HTTP request to the node failed (connect, timeout, body read).
    #[error("RPC request failed: {0}")]
    Request(String),

    /// The node answered with a non-success HTTP status.
    #[error("RPC response error: status {status}")]
    Status { status: u16, body: String },

    /// The node returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response body was not the expected JSON shape.
    #[error("RPC response parse failed: {0}")]
    Parse(String),

    /// A storage value could not be SCALE-decoded.
    #[error("failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    /// A storage key did not have the expected layout.
    #[error("malformed storage key: {0}")]
    MalformedKey(String),

    /// A required storage entry is absent.
    #[error("missing {item} for asset {asset_id}")]
    MissingEntry { item: &'static str, asset_id: u128 },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REGISTRY KIND
// =============================================================================

/// Which asset registry to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Assets minted on the chain itself (`LocalAssets` pallet).
    Local,
    /// Assets bridged in over XCM (`Assets` pallet + `AssetManager` origin).
    External,
}

impl RegistryKind {
    pub const ALL: [RegistryKind; 2] = [RegistryKind::External, RegistryKind::Local];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::External => "external",
        }
    }

    /// Storage pallet holding this registry.
    #[must_use]
    pub fn pallet(self) -> &'static str {
        match self {
            Self::Local => "LocalAssets",
            Self::External => "Assets",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "local" => Some(Self::Local),
            "external" => Some(Self::External),
            _ => None,
        }
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Point lookups and enumeration against one connected network.
#[async_trait::async_trait]
pub trait ChainQuery: Send + Sync {
    /// Every `(asset_id, details)` entry in the registry for `kind`.
    async fn asset_entries(&self, kind: RegistryKind) -> Result<Vec<(u128, AssetDetails)>, ChainError>;

    /// Name, symbol, and decimals for `asset_id`.
    async fn asset_metadata(&self, kind: RegistryKind, asset_id: u128) -> Result<AssetMetadata, ChainError>;

    /// Multilocation descriptor for an external asset.
    async fn asset_location(&self, asset_id: u128) -> Result<AssetLocation, ChainError>;
}

/// Opens a query connection scoped to a network.
#[async_trait::async_trait]
pub trait ChainConnector: Send + Sync {
    async fn connect(&self, network: Network) -> Result<Arc<dyn ChainQuery>, ChainError>;
}
