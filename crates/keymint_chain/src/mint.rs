//! Presale and public mint submission.

use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::SolCall;
use keymint_core::{Chain, KeymintConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::abi::IKeymintNft;
use crate::allowlist::Allowlists;
use crate::contract::NftContract;
use crate::eligibility::{MintLimits, check_eligibility};
use crate::error::ChainError;
use crate::phase::MintPhase;
use crate::rpc::EthRpc;
use crate::wallet::{TransactionRequest, WalletProvider};

pub const WALLET_NOT_CONNECTED: &str = "To be able to mint, you need to connect your wallet";
pub const MINTING_PAUSED: &str = "Minting is paused";
pub const NOT_ON_KEYLIST: &str = "You are not on the KeyList";
pub const NOT_ON_MASTERKEY: &str = "You are not on the MasterKey";
pub const PRESALE_SOLD_OUT: &str = "Pre-Sale supply is sold out";
pub const INVALID_AMOUNT: &str = "Mint amount must be at least 1";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What the site shows after a mint attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintOutcome {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl MintOutcome {
    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            success: false,
            status: status.into(),
            tx_hash: None,
            explorer_url: None,
        }
    }

    pub fn submitted(chain: Chain, tx_hash: B256) -> Self {
        let url = chain.tx_url(&tx_hash.to_string());
        Self {
            success: true,
            status: format!(
                "✅ Check out your transaction on {}: {url}",
                chain.explorer_name()
            ),
            tx_hash: Some(tx_hash),
            explorer_url: Some(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Site-side mint parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintSettings {
    pub chain: Chain,
    /// Price per token in wei.
    pub price: U256,
    pub limits: MintLimits,
    pub presale_supply_cap: u64,
}

impl MintSettings {
    pub fn from_config(config: &KeymintConfig) -> anyhow::Result<Self> {
        Ok(Self {
            chain: config.chain,
            price: config.price_wei()?,
            limits: MintLimits::from_config(config),
            presale_supply_cap: config.presale_supply_cap,
        })
    }
}

// ---------------------------------------------------------------------------
// Minter
// ---------------------------------------------------------------------------

/// Gates and submits mints for the connected wallet.
///
/// Gating failures come back as `Ok(MintOutcome { success: false, .. })`.
/// Read failures before submission are returned as `Err`; a wallet failure
/// during submission becomes a failed outcome.
pub struct Minter<R, W> {
    contract: NftContract<R>,
    wallet: W,
    allowlists: Allowlists,
    settings: MintSettings,
}

impl<R: EthRpc, W: WalletProvider> Minter<R, W> {
    pub fn new(
        contract: NftContract<R>,
        wallet: W,
        allowlists: Allowlists,
        settings: MintSettings,
    ) -> Self {
        Self {
            contract,
            wallet,
            allowlists,
            settings,
        }
    }

    pub fn contract(&self) -> &NftContract<R> {
        &self.contract
    }

    pub fn allowlists(&self) -> &Allowlists {
        &self.allowlists
    }

    pub fn settings(&self) -> &MintSettings {
        &self.settings
    }

    /// Connection, amount and pause checks shared by both mint paths.
    async fn precheck(&self, amount: u64) -> Result<Result<Address, MintOutcome>, ChainError> {
        let Some(from) = self.wallet.selected_address() else {
            return Ok(Err(MintOutcome::failure(WALLET_NOT_CONNECTED)));
        };
        if amount == 0 {
            return Ok(Err(MintOutcome::failure(INVALID_AMOUNT)));
        }
        if self.contract.is_paused().await? {
            info!(%from, "mint refused: paused");
            return Ok(Err(MintOutcome::failure(MINTING_PAUSED)));
        }
        Ok(Ok(from))
    }

    /// Allowlisted mint for the OG and whitelist phases.
    pub async fn presale_mint(&self, amount: u64) -> Result<MintOutcome, ChainError> {
        let from = match self.precheck(amount).await? {
            Ok(from) => from,
            Err(outcome) => return Ok(outcome),
        };

        let phase = match self.contract.mint_state().await? {
            MintPhase::Og => MintPhase::Og,
            MintPhase::Whitelist | MintPhase::Public => MintPhase::Whitelist,
        };
        let tree = self.allowlists.tree_for(phase);
        let Some(proof) = tree.membership_proof(&from) else {
            info!(%from, phase = %phase, "mint refused: not allowlisted");
            let status = match phase {
                MintPhase::Og => NOT_ON_MASTERKEY,
                _ => NOT_ON_KEYLIST,
            };
            return Ok(MintOutcome::failure(status));
        };

        let price = self.settings.price;
        let eligibility = check_eligibility(
            &self.contract,
            from,
            price,
            amount,
            phase,
            &self.settings.limits,
        )
        .await?;
        if let Some(status) = eligibility.status() {
            return Ok(MintOutcome::failure(status));
        }

        let minted = self.contract.total_minted().await?;
        if minted > U256::from(self.settings.presale_supply_cap) {
            info!(%minted, cap = self.settings.presale_supply_cap, "presale sold out");
            return Ok(MintOutcome::failure(PRESALE_SOLD_OUT));
        }

        let data = IKeymintNft::presaleMintCall {
            amount: U256::from(amount),
            proof,
        }
        .abi_encode();
        self.submit(from, amount, data.into()).await
    }

    /// Unrestricted mint for the public phase.
    pub async fn public_mint(&self, amount: u64) -> Result<MintOutcome, ChainError> {
        let from = match self.precheck(amount).await? {
            Ok(from) => from,
            Err(outcome) => return Ok(outcome),
        };

        let eligibility = check_eligibility(
            &self.contract,
            from,
            self.settings.price,
            amount,
            MintPhase::Public,
            &self.settings.limits,
        )
        .await?;
        if let Some(status) = eligibility.status() {
            return Ok(MintOutcome::failure(status));
        }

        let data = IKeymintNft::publicMintCall {
            amount: U256::from(amount),
        }
        .abi_encode();
        self.submit(from, amount, data.into()).await
    }

    async fn submit(&self, from: Address, amount: u64, data: Bytes) -> Result<MintOutcome, ChainError> {
        let nonce = self.contract.rpc().get_transaction_count(from).await?;
        let tx = TransactionRequest {
            to: self.contract.address(),
            from,
            value: self.settings.price.saturating_mul(U256::from(amount)),
            data,
            nonce,
        };

        match self.wallet.send_transaction(&tx).await {
            Ok(hash) => {
                info!(%from, amount, tx_hash = %hash, "mint submitted");
                Ok(MintOutcome::submitted(self.settings.chain, hash))
            }
            Err(e) => {
                warn!(%from, amount, error = %e, "mint submission failed");
                Ok(MintOutcome::failure(format!("😞 Something went wrong: {e}")))
            }
        }
    }
}
