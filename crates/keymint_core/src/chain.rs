use std::fmt;

use serde::{Deserialize, Serialize};

/// EVM networks the mint site can be deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Ethereum,
    Sepolia,
    Base,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Ethereum, Chain::Sepolia, Chain::Base];

    /// Human-readable label for the chain.
    pub fn label(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum Mainnet",
            Chain::Sepolia => "Sepolia Testnet",
            Chain::Base => "Base Mainnet",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Sepolia => 11_155_111,
            Chain::Base => 8453,
        }
    }

    /// Public RPC endpoint used when no custom URL is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Chain::Ethereum => "https://eth.llamarpc.com",
            Chain::Sepolia => "https://rpc.sepolia.org",
            Chain::Base => "https://mainnet.base.org",
        }
    }

    /// Name of the block explorer, as shown to the minter.
    pub fn explorer_name(&self) -> &'static str {
        match self {
            Chain::Ethereum | Chain::Sepolia => "Etherscan",
            Chain::Base => "Basescan",
        }
    }

    pub fn explorer_url(&self) -> &'static str {
        match self {
            Chain::Ethereum => "https://etherscan.io",
            Chain::Sepolia => "https://sepolia.etherscan.io",
            Chain::Base => "https://basescan.org",
        }
    }

    /// Explorer page for a transaction hash (`0x`-prefixed).
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
