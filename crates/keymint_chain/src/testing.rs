//! Mock node and wallet shared by the unit tests.

use std::sync::Mutex;

use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, B256, Bytes, U256, address};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;

use crate::abi::IKeymintNft;
use crate::error::ChainError;
use crate::rpc::EthRpc;
use crate::wallet::{TransactionRequest, WalletProvider};

pub(crate) const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

pub(crate) fn eth(amount: &str) -> U256 {
    parse_ether(amount).unwrap()
}

// ---------------------------------------------------------------------------
// MockRpc
// ---------------------------------------------------------------------------

/// Answers contract reads from its fields and records what was asked.
pub(crate) struct MockRpc {
    pub total_supply: u64,
    pub max_supply: u64,
    pub paused: bool,
    pub mint_state: u8,
    pub cost: U256,
    pub og_cost: U256,
    pub og_limit: u64,
    pub whitelist_limit: u64,
    pub public_limit: u64,
    pub token_balance: u64,
    pub eth_balance: U256,
    pub nonce: u64,
    /// Every request fails with a network error.
    pub fail: bool,
    /// `eth_call` returns empty data, as for an address without code.
    pub no_code: bool,
    pub log: Mutex<Vec<String>>,
}

impl Default for MockRpc {
    fn default() -> Self {
        Self {
            total_supply: 100,
            max_supply: 10_000,
            paused: false,
            mint_state: 1,
            cost: eth("0.02"),
            og_cost: eth("0.01"),
            og_limit: 3,
            whitelist_limit: 2,
            public_limit: 5,
            token_balance: 0,
            eth_balance: eth("1"),
            nonce: 7,
            fail: false,
            no_code: false,
            log: Mutex::new(Vec::new()),
        }
    }
}

impl MockRpc {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: &str) -> Result<(), ChainError> {
        self.log.lock().unwrap().push(entry.to_string());
        if self.fail {
            return Err(ChainError::Network("connection refused".into()));
        }
        Ok(())
    }

    fn answer(&self, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| ChainError::InvalidResponse("calldata too short".into()))?;

        let encoded = if selector == IKeymintNft::totalSupplyCall::SELECTOR {
            U256::from(self.total_supply).abi_encode()
        } else if selector == IKeymintNft::maxSupplyCall::SELECTOR {
            U256::from(self.max_supply).abi_encode()
        } else if selector == IKeymintNft::isPausedCall::SELECTOR {
            self.paused.abi_encode()
        } else if selector == IKeymintNft::mintStateCall::SELECTOR {
            U256::from(self.mint_state).abi_encode()
        } else if selector == IKeymintNft::costCall::SELECTOR {
            self.cost.abi_encode()
        } else if selector == IKeymintNft::ogCostCall::SELECTOR {
            self.og_cost.abi_encode()
        } else if selector == IKeymintNft::ogLimitCall::SELECTOR {
            U256::from(self.og_limit).abi_encode()
        } else if selector == IKeymintNft::whitelistLimitCall::SELECTOR {
            U256::from(self.whitelist_limit).abi_encode()
        } else if selector == IKeymintNft::publicLimitCall::SELECTOR {
            U256::from(self.public_limit).abi_encode()
        } else if selector == IKeymintNft::balanceOfCall::SELECTOR {
            U256::from(self.token_balance).abi_encode()
        } else {
            return Err(ChainError::Rpc {
                code: -32000,
                message: "execution reverted".into(),
            });
        };
        Ok(encoded)
    }
}

#[async_trait]
impl EthRpc for MockRpc {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        self.record("eth_call")?;
        assert_eq!(to, CONTRACT, "read sent to the wrong contract");
        if self.no_code {
            return Ok(Bytes::new());
        }
        Ok(self.answer(&data)?.into())
    }

    async fn get_balance(&self, _owner: Address) -> Result<U256, ChainError> {
        self.record("eth_getBalance")?;
        Ok(self.eth_balance)
    }

    async fn get_transaction_count(&self, _owner: Address) -> Result<U256, ChainError> {
        self.record("eth_getTransactionCount")?;
        Ok(U256::from(self.nonce))
    }
}

// ---------------------------------------------------------------------------
// MockWallet
// ---------------------------------------------------------------------------

/// Wallet that records submitted transactions and returns a fixed hash.
pub(crate) struct MockWallet {
    pub selected: Option<Address>,
    pub reject_with: Option<String>,
    pub sent: Mutex<Vec<TransactionRequest>>,
}

impl MockWallet {
    pub fn connected(address: Address) -> Self {
        Self {
            selected: Some(address),
            reject_with: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            selected: None,
            reject_with: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(address: Address, message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Self::connected(address)
        }
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn tx_hash() -> B256 {
        B256::repeat_byte(0xab)
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn selected_address(&self) -> Option<Address> {
        self.selected
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError> {
        self.sent.lock().unwrap().push(tx.clone());
        match &self.reject_with {
            Some(message) => Err(ChainError::Wallet(message.clone())),
            None => Ok(Self::tx_hash()),
        }
    }
}
