//! Dashboard configuration parsed from environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::network::Network;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 16;
pub const DEFAULT_RPC_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RPC_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub port: u16,
    pub default_network: Network,
    /// Upper bound on per-record lookups in flight during one registry load.
    pub fetch_concurrency: usize,
    pub timeouts: RpcTimeouts,
    /// Static files (network avatars, favicon) served at the site root.
    pub public_dir: PathBuf,
    endpoints: HashMap<Network, String>,
}

impl DashboardConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `PORT`: default 3000
    /// - `XC20_DEFAULT_NETWORK`: `moonbeam` (default), `moonriver`, `moonbase`
    /// - `MOONBEAM_RPC_URL`, `MOONRIVER_RPC_URL`, `MOONBASE_RPC_URL`: public endpoints by default
    /// - `XC20_FETCH_CONCURRENCY`: default 16, must be at least 1
    /// - `RPC_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RPC_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PUBLIC_DIR`: default `public/` next to `Cargo.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let default_network = match std::env::var("XC20_DEFAULT_NETWORK") {
            Ok(raw) => Network::parse(&raw).ok_or(ConfigError::InvalidValue { var: "XC20_DEFAULT_NETWORK", value: raw })?,
            Err(_) => Network::default(),
        };

        let fetch_concurrency = env_parse("XC20_FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?;
        if fetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue { var: "XC20_FETCH_CONCURRENCY", value: "0".into() });
        }

        let timeouts = RpcTimeouts {
            request_secs: env_parse("RPC_REQUEST_TIMEOUT_SECS", DEFAULT_RPC_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("RPC_CONNECT_TIMEOUT_SECS", DEFAULT_RPC_CONNECT_TIMEOUT_SECS)?,
        };

        let public_dir = std::env::var("PUBLIC_DIR").map_or_else(|_| default_public_dir(), PathBuf::from);

        let mut config = Self {
            port,
            default_network,
            fetch_concurrency,
            timeouts,
            public_dir,
            endpoints: HashMap::new(),
        };
        for network in Network::ALL {
            if let Ok(url) = std::env::var(endpoint_var(network)) {
                config = config.with_endpoint(network, url.trim().trim_end_matches('/'));
            }
        }
        Ok(config)
    }

    /// JSON-RPC endpoint for `network`.
    #[must_use]
    pub fn endpoint(&self, network: Network) -> &str {
        self.endpoints
            .get(&network)
            .map_or_else(|| network.default_rpc_url(), String::as_str)
    }

    /// Override the endpoint for one network.
    #[must_use]
    pub fn with_endpoint(mut self, network: Network, url: impl Into<String>) -> Self {
        self.endpoints.insert(network, url.into());
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_network: Network::default(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            timeouts: RpcTimeouts {
                request_secs: DEFAULT_RPC_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_RPC_CONNECT_TIMEOUT_SECS,
            },
            public_dir: default_public_dir(),
            endpoints: HashMap::new(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

fn endpoint_var(network: Network) -> &'static str {
    match network {
        Network::Moonbeam => "MOONBEAM_RPC_URL",
        Network::Moonriver => "MOONRIVER_RPC_URL",
        Network::Moonbase => "MOONBASE_RPC_URL",
    }
}

fn env_parse<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
