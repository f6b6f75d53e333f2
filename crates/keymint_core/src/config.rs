use std::path::{Path, PathBuf};

use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chain::Chain;

/// Environment variable that overrides the configured RPC endpoint.
pub const RPC_URL_ENV: &str = "KEYMINT_RPC_URL";

// ---------------------------------------------------------------------------
// KeymintConfig
// ---------------------------------------------------------------------------

/// Mint site configuration stored at `~/.keymint/config.json`.
///
/// Relative allowlist paths are resolved against the directory holding the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeymintConfig {
    // Network
    pub chain: Chain,
    pub rpc_url: Option<String>,
    pub wallet_url: String,

    // Contract
    pub contract_address: Address,
    pub price_eth: String,

    // Per-wallet caps, by phase
    pub og_limit: u64,
    pub whitelist_limit: u64,
    pub public_limit: u64,

    /// Presale mints are refused once `totalSupply()` exceeds this.
    pub presale_supply_cap: u64,

    // Allowlists
    pub whitelist_path: PathBuf,
    pub og_path: PathBuf,

    // General
    pub log_level: String,
}

impl Default for KeymintConfig {
    fn default() -> Self {
        Self {
            chain: Chain::Ethereum,
            rpc_url: None,
            wallet_url: "http://127.0.0.1:1248".into(),
            contract_address: Address::ZERO,
            price_eth: "0.02".into(),
            og_limit: 3,
            whitelist_limit: 2,
            public_limit: 5,
            presale_supply_cap: 5000,
            whitelist_path: PathBuf::from("whitelist.json"),
            og_path: PathBuf::from("og.json"),
            log_level: "info".into(),
        }
    }
}

impl KeymintConfig {
    /// Returns the base config directory: `~/.keymint/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".keymint"))
    }

    /// Returns the config file path: `~/.keymint/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.keymint/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Loads config from the default location, or creates a default one if missing.
    pub fn load() -> Result<Self> {
        let dir = Self::base_dir()?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load config from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            config
        };

        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.whitelist_path.is_relative() {
            self.whitelist_path = base.join(&self.whitelist_path);
        }
        if self.og_path.is_relative() {
            self.og_path = base.join(&self.og_path);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            if !url.trim().is_empty() {
                info!(env = RPC_URL_ENV, "using RPC URL from environment");
                self.rpc_url = Some(url.trim().to_string());
            }
        }
    }

    /// The RPC endpoint to read chain state from: the custom URL if set,
    /// otherwise the chain's public default.
    pub fn effective_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.chain.default_rpc_url())
    }

    /// Mint price per token, in wei.
    pub fn price_wei(&self) -> Result<U256> {
        parse_ether(self.price_eth.trim())
            .map_err(|e| anyhow::anyhow!("Invalid mint price {:?}: {e}", self.price_eth))
    }

    /// Checks the fields that have no usable default.
    pub fn validate(&self) -> Result<()> {
        if self.contract_address == Address::ZERO {
            anyhow::bail!("contract_address is not configured");
        }
        self.price_wei()?;
        if !validate_url(self.effective_rpc_url()) {
            anyhow::bail!("invalid RPC URL: {}", self.effective_rpc_url());
        }
        if !validate_url(&self.wallet_url) {
            anyhow::bail!("invalid wallet URL: {}", self.wallet_url);
        }
        if self.public_limit == 0 || self.whitelist_limit == 0 {
            warn!("a per-wallet mint limit is zero; mints in that phase will always be refused");
        }
        Ok(())
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
