use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::abi::IKeymintNft;
use crate::error::ChainError;
use crate::phase::MintPhase;
use crate::rpc::EthRpc;

/// Read-only view of the deployed mint contract.
///
/// Every getter is a single `eth_call`; nothing is cached.
pub struct NftContract<R> {
    address: Address,
    rpc: R,
}

impl<R: EthRpc> NftContract<R> {
    pub fn new(address: Address, rpc: R) -> Self {
        Self { address, rpc }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The underlying node connection, for non-contract reads.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, ChainError> {
        debug!(contract = %self.address, function = C::SIGNATURE, "contract read");
        let output = self.rpc.call(self.address, call.abi_encode().into()).await?;
        C::abi_decode_returns(&output, true)
            .map_err(|e| ChainError::Decode(format!("{}: {e}", C::SIGNATURE)))
    }

    /// Number of tokens minted so far (`totalSupply()`).
    pub async fn total_minted(&self) -> Result<U256, ChainError> {
        Ok(self.read(IKeymintNft::totalSupplyCall {}).await?.supply)
    }

    pub async fn max_supply(&self) -> Result<U256, ChainError> {
        Ok(self.read(IKeymintNft::maxSupplyCall {}).await?.supply)
    }

    pub async fn is_paused(&self) -> Result<bool, ChainError> {
        Ok(self.read(IKeymintNft::isPausedCall {}).await?.paused)
    }

    pub async fn mint_state(&self) -> Result<MintPhase, ChainError> {
        let raw = self.read(IKeymintNft::mintStateCall {}).await?.state;
        MintPhase::try_from(raw)
    }

    pub async fn is_public_sale(&self) -> Result<bool, ChainError> {
        Ok(self.mint_state().await? == MintPhase::Public)
    }

    pub async fn is_presale(&self) -> Result<bool, ChainError> {
        Ok(self.mint_state().await?.is_presale())
    }

    /// On-chain price per token in wei: `ogCost()` for OG, `cost()` otherwise.
    pub async fn price_for_phase(&self, phase: MintPhase) -> Result<U256, ChainError> {
        match phase {
            MintPhase::Og => Ok(self.read(IKeymintNft::ogCostCall {}).await?.price),
            MintPhase::Whitelist | MintPhase::Public => {
                Ok(self.read(IKeymintNft::costCall {}).await?.price)
            }
        }
    }

    /// On-chain per-wallet mint limit for a phase.
    pub async fn limit_for_phase(&self, phase: MintPhase) -> Result<U256, ChainError> {
        match phase {
            MintPhase::Og => Ok(self.read(IKeymintNft::ogLimitCall {}).await?.limit),
            MintPhase::Whitelist => Ok(self.read(IKeymintNft::whitelistLimitCall {}).await?.limit),
            MintPhase::Public => Ok(self.read(IKeymintNft::publicLimitCall {}).await?.limit),
        }
    }

    pub async fn current_mint_price(&self) -> Result<U256, ChainError> {
        let phase = self.mint_state().await?;
        self.price_for_phase(phase).await
    }

    pub async fn current_mint_limit(&self) -> Result<U256, ChainError> {
        let phase = self.mint_state().await?;
        self.limit_for_phase(phase).await
    }

    /// Tokens held by `owner` (`balanceOf(owner)`).
    pub async fn token_balance(&self, owner: Address) -> Result<U256, ChainError> {
        Ok(self
            .read(IKeymintNft::balanceOfCall { owner })
            .await?
            .balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CONTRACT, MockRpc, eth};

    fn contract(rpc: MockRpc) -> NftContract<MockRpc> {
        NftContract::new(CONTRACT, rpc)
    }

    #[tokio::test]
    async fn reads_supply_and_pause_flag() {
        let nft = contract(MockRpc {
            total_supply: 1234,
            max_supply: 7777,
            paused: true,
            ..MockRpc::default()
        });
        assert_eq!(nft.total_minted().await.unwrap(), U256::from(1234));
        assert_eq!(nft.max_supply().await.unwrap(), U256::from(7777));
        assert!(nft.is_paused().await.unwrap());
    }

    #[tokio::test]
    async fn reads_mint_state() {
        let nft = contract(MockRpc {
            mint_state: 2,
            ..MockRpc::default()
        });
        assert_eq!(nft.mint_state().await.unwrap(), MintPhase::Public);
        assert!(nft.is_public_sale().await.unwrap());
        assert!(!nft.is_presale().await.unwrap());
    }

    #[tokio::test]
    async fn unknown_mint_state_is_an_error() {
        let nft = contract(MockRpc {
            mint_state: 9,
            ..MockRpc::default()
        });
        assert!(matches!(
            nft.mint_state().await,
            Err(ChainError::UnknownMintState(9))
        ));
    }

    #[tokio::test]
    async fn price_depends_on_phase() {
        let nft = contract(MockRpc {
            cost: eth("0.05"),
            og_cost: eth("0.03"),
            ..MockRpc::default()
        });
        assert_eq!(nft.price_for_phase(MintPhase::Og).await.unwrap(), eth("0.03"));
        assert_eq!(
            nft.price_for_phase(MintPhase::Whitelist).await.unwrap(),
            eth("0.05")
        );
        assert_eq!(nft.price_for_phase(MintPhase::Public).await.unwrap(), eth("0.05"));
    }

    #[tokio::test]
    async fn limit_depends_on_phase() {
        let nft = contract(MockRpc {
            og_limit: 3,
            whitelist_limit: 2,
            public_limit: 10,
            ..MockRpc::default()
        });
        assert_eq!(nft.limit_for_phase(MintPhase::Og).await.unwrap(), U256::from(3));
        assert_eq!(
            nft.limit_for_phase(MintPhase::Whitelist).await.unwrap(),
            U256::from(2)
        );
        assert_eq!(
            nft.limit_for_phase(MintPhase::Public).await.unwrap(),
            U256::from(10)
        );
    }

    #[tokio::test]
    async fn current_price_and_limit_follow_live_state() {
        let nft = contract(MockRpc {
            mint_state: 0,
            og_cost: eth("0.01"),
            og_limit: 4,
            ..MockRpc::default()
        });
        assert_eq!(nft.current_mint_price().await.unwrap(), eth("0.01"));
        assert_eq!(nft.current_mint_limit().await.unwrap(), U256::from(4));
    }

    #[tokio::test]
    async fn reads_token_balance() {
        let nft = contract(MockRpc {
            token_balance: 2,
            ..MockRpc::default()
        });
        let owner = Address::repeat_byte(0x42);
        assert_eq!(nft.token_balance(owner).await.unwrap(), U256::from(2));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let nft = contract(MockRpc::failing());
        assert!(matches!(
            nft.total_minted().await,
            Err(ChainError::Network(_))
        ));
    }

    #[tokio::test]
    async fn empty_return_data_is_a_decode_error() {
        let nft = contract(MockRpc {
            no_code: true,
            ..MockRpc::default()
        });
        let err = nft.max_supply().await.unwrap_err();
        assert!(matches!(err, ChainError::Decode(_)));
        assert!(err.to_string().contains("maxSupply()"));
    }
}
