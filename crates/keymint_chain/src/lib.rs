//! # keymint_chain
//!
//! Chain access for the mint site: contract reads, allowlist proofs,
//! eligibility checks and mint submission through the user's wallet.

pub mod abi;
pub mod allowlist;
pub mod contract;
pub mod eligibility;
pub mod error;
pub mod mint;
pub mod phase;
pub mod rpc;
pub mod rpc_config;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types for convenient access.
pub use allowlist::{AllowlistTree, Allowlists, leaf_for, load_address_list, parse_address_list};
pub use contract::NftContract;
pub use eligibility::{Eligibility, MintLimits, check_eligibility};
pub use error::ChainError;
pub use mint::{MintOutcome, MintSettings, Minter};
pub use phase::MintPhase;
pub use rpc::{EthRpc, JsonRpcClient};
pub use rpc_config::{RpcConfig, RpcConfigStore};
pub use wallet::{RpcWallet, TransactionRequest, WalletProvider};

pub use alloy_primitives::{Address, B256, U256};
