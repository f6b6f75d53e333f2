use std::collections::HashMap;
use std::time::Duration;

use keymint_core::{Chain, KeymintConfig, validate_url};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChainError;
use crate::rpc::JsonRpcClient;

/// Configuration for a single RPC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub chain: Chain,
    pub url: String,
    pub is_custom: bool,
    pub timeout_secs: u64,
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl RpcConfig {
    fn default_for(chain: Chain) -> Self {
        Self {
            chain,
            url: chain.default_rpc_url().to_string(),
            is_custom: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a JSON-RPC client for this endpoint.
    pub fn client(&self) -> Result<JsonRpcClient, ChainError> {
        JsonRpcClient::new(self.url.clone(), Duration::from_secs(self.timeout_secs))
    }
}

/// Manages per-chain RPC endpoint configuration with custom override support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfigStore {
    configs: HashMap<Chain, RpcConfig>,
}

impl RpcConfigStore {
    /// Create a store populated with each chain's public default RPC URL.
    pub fn with_defaults() -> Self {
        let configs = Chain::ALL
            .into_iter()
            .map(|chain| (chain, RpcConfig::default_for(chain)))
            .collect();
        Self { configs }
    }

    /// Defaults plus the custom RPC URL from the site config, if any.
    pub fn from_config(config: &KeymintConfig) -> anyhow::Result<Self> {
        let mut store = Self::with_defaults();
        if let Some(url) = &config.rpc_url {
            store.set_custom_rpc(config.chain, url.clone())?;
            info!(chain = %config.chain, "using custom RPC endpoint");
        }
        Ok(store)
    }

    pub fn get_rpc(&self, chain: Chain) -> Option<&RpcConfig> {
        self.configs.get(&chain)
    }

    /// Override the RPC URL for a chain with a custom endpoint.
    ///
    /// Returns `Err` if the URL fails validation.
    pub fn set_custom_rpc(&mut self, chain: Chain, url: String) -> anyhow::Result<()> {
        if !validate_url(&url) {
            anyhow::bail!("invalid RPC URL: {url}");
        }

        let entry = self
            .configs
            .entry(chain)
            .or_insert_with(|| RpcConfig::default_for(chain));
        entry.url = url;
        entry.is_custom = true;
        Ok(())
    }

    /// Reset a chain's RPC URL back to the built-in default.
    pub fn reset_to_default(&mut self, chain: Chain) {
        self.configs.insert(chain, RpcConfig::default_for(chain));
    }

    /// Build a client for the given chain's current endpoint.
    pub fn client_for(&self, chain: Chain) -> Result<JsonRpcClient, ChainError> {
        self.get_rpc(chain)
            .ok_or_else(|| ChainError::Network(format!("no RPC endpoint configured for {chain}")))?
            .client()
    }
}

impl Default for RpcConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
