use alloy_primitives::{Address, U256};
use keymint_core::KeymintConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::NftContract;
use crate::error::ChainError;
use crate::phase::MintPhase;
use crate::rpc::EthRpc;

/// Per-wallet mint caps enforced client-side, by phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintLimits {
    pub og: u64,
    pub whitelist: u64,
    pub public: u64,
}

impl MintLimits {
    pub fn from_config(config: &KeymintConfig) -> Self {
        Self {
            og: config.og_limit,
            whitelist: config.whitelist_limit,
            public: config.public_limit,
        }
    }

    pub fn for_phase(&self, phase: MintPhase) -> u64 {
        match phase {
            MintPhase::Og => self.og,
            MintPhase::Whitelist => self.whitelist,
            MintPhase::Public => self.public,
        }
    }
}

/// Result of the funds and limit checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Allowed,
    InsufficientFunds,
    LimitExceeded,
}

impl Eligibility {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Eligibility::Allowed)
    }

    /// Status shown to the minter when not allowed.
    pub fn status(&self) -> Option<&'static str> {
        match self {
            Eligibility::Allowed => None,
            Eligibility::InsufficientFunds => Some("Insufficient funds"),
            Eligibility::LimitExceeded => Some("Mint limit exceeded"),
        }
    }
}

/// Checks that `wallet` can pay `amount * cost` and would stay within the
/// phase's per-wallet limit after minting `amount` more.
pub async fn check_eligibility<R: EthRpc>(
    contract: &NftContract<R>,
    wallet: Address,
    cost: U256,
    amount: u64,
    phase: MintPhase,
    limits: &MintLimits,
) -> Result<Eligibility, ChainError> {
    let amount = U256::from(amount);

    let balance = contract.rpc().get_balance(wallet).await?;
    let total_cost = cost.saturating_mul(amount);
    if balance < total_cost {
        debug!(%wallet, %balance, %total_cost, "insufficient funds");
        return Ok(Eligibility::InsufficientFunds);
    }

    let max_amount = U256::from(limits.for_phase(phase));
    let held = contract.token_balance(wallet).await?;
    if held.saturating_add(amount) > max_amount {
        debug!(%wallet, %held, %max_amount, phase = %phase, "mint limit exceeded");
        return Ok(Eligibility::LimitExceeded);
    }

    Ok(Eligibility::Allowed)
}
