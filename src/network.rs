//! Network environments and the page-level network selector.
//!
//! DESIGN
//! ======
//! The selected network lives in the `network` URL query parameter so that a
//! reload or a shared link reproduces the same view. `NetworkSelector` owns
//! the current value and reconciles it against whatever the URL carries.

use serde::Serialize;

// =============================================================================
// NETWORK
// =============================================================================

/// Moonbeam-family environment the dashboard can query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Moonbeam,
    Moonriver,
    Moonbase,
}

impl Network {
    /// Every selectable network, in menu order.
    pub const ALL: [Network; 3] = [Network::Moonbeam, Network::Moonriver, Network::Moonbase];

    /// Identifier used in URLs and config.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moonbeam => "moonbeam",
            Self::Moonriver => "moonriver",
            Self::Moonbase => "moonbase",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Moonbeam => "Moonbeam",
            Self::Moonriver => "Moonriver",
            Self::Moonbase => "Moonbase Alpha",
        }
    }

    /// Menu avatar, served from the public directory.
    #[must_use]
    pub fn avatar(self) -> &'static str {
        match self {
            Self::Moonbeam => "/moonbeam.png",
            Self::Moonriver => "/moonriver.png",
            Self::Moonbase => "/moonbase.png",
        }
    }

    /// Public HTTPS JSON-RPC endpoint.
    #[must_use]
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Self::Moonbeam => "https://rpc.api.moonbeam.network",
            Self::Moonriver => "https://rpc.api.moonriver.moonbeam.network",
            Self::Moonbase => "https://rpc.api.moonbase.moonbeam.network",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.as_str() == raw.trim())
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Menu entry shape shared by the page dropdown and `/api/networks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkOption {
    pub key: &'static str,
    pub text: &'static str,
    pub value: &'static str,
    pub image: &'static str,
}

#[must_use]
pub fn network_options() -> Vec<NetworkOption> {
    Network::ALL
        .into_iter()
        .map(|n| NetworkOption { key: n.label(), text: n.label(), value: n.as_str(), image: n.avatar() })
        .collect()
}

// =============================================================================
// SELECTOR
// =============================================================================

/// Owns the selected network and keeps it in step with the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSelector {
    network: Network,
}

impl NetworkSelector {
    /// Initial state: a valid URL value wins over `default`.
    #[must_use]
    pub fn initial(url_value: Option<&str>, default: Network) -> Self {
        let mut selector = Self { network: default };
        selector.reconcile(url_value);
        selector
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Adopt the URL value if it names a different network.
    ///
    /// Returns `true` when the selection changed. Unknown values are ignored.
    pub fn reconcile(&mut self, url_value: Option<&str>) -> bool {
        let Some(raw) = url_value.filter(|v| !v.is_empty()) else {
            return false;
        };
        let Some(network) = Network::parse(raw) else {
            tracing::warn!(value = raw, "ignoring unknown network in URL");
            return false;
        };
        if network == self.network {
            return false;
        }
        self.network = network;
        true
    }

    /// User picked `network` from the menu; returns the URL to navigate to.
    pub fn select(&mut self, network: Network) -> String {
        self.network = network;
        share_url(network)
    }
}

/// Shareable dashboard URL for `network`.
#[must_use]
pub fn share_url(network: Network) -> String {
    format!("/?network={}", network.as_str())
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
