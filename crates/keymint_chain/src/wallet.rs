use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::error::ChainError;
use crate::rpc::JsonRpcClient;

/// Transaction handed to the wallet for signing and broadcast.
///
/// Quantities serialize as minimal `0x` hex, `data` as `0x` bytes, which is
/// the shape `eth_sendTransaction` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub from: Address,
    pub value: U256,
    pub data: Bytes,
    pub nonce: U256,
}

/// The user's wallet: which account is connected and how to submit.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The connected account, if any.
    fn selected_address(&self) -> Option<Address>;

    /// Ask the wallet to sign and broadcast `tx`. Returns the transaction hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError>;
}

// ---------------------------------------------------------------------------
// RpcWallet
// ---------------------------------------------------------------------------

/// A wallet reached over JSON-RPC, such as a desktop wallet's local RPC
/// bridge or a dev node with unlocked accounts. The node owns the keys.
pub struct RpcWallet {
    rpc: JsonRpcClient,
    selected: Option<Address>,
}

impl RpcWallet {
    /// Use an explicitly chosen account.
    pub fn new(rpc: JsonRpcClient, selected: Option<Address>) -> Self {
        Self { rpc, selected }
    }

    /// Select the first account the wallet exposes through `eth_accounts`.
    pub async fn connect(rpc: JsonRpcClient) -> Result<Self, ChainError> {
        let accounts: Vec<Address> = rpc.request("eth_accounts", json!([])).await?;
        let selected = accounts.first().copied();
        match selected {
            Some(address) => info!(%address, url = rpc.url(), "wallet connected"),
            None => warn!(url = rpc.url(), "wallet exposes no accounts"),
        }
        Ok(Self { rpc, selected })
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    fn selected_address(&self) -> Option<Address> {
        self.selected
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError> {
        self.rpc
            .request("eth_sendTransaction", json!([tx]))
            .await
            .map_err(|e| match e {
                ChainError::Rpc { message, .. } => ChainError::Wallet(message),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::eth;
    use std::time::Duration;

    #[test]
    fn transaction_request_uses_hex_quantities() {
        let tx = TransactionRequest {
            to: Address::with_last_byte(1),
            from: Address::with_last_byte(2),
            value: eth("0.02"),
            data: Bytes::from(vec![0xde, 0xad]),
            nonce: U256::from(5),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["value"], "0x470de4df820000");
        assert_eq!(value["nonce"], "0x5");
        assert_eq!(value["data"], "0xdead");
        assert_eq!(
            value["to"].as_str().unwrap().to_lowercase(),
            "0x0000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn explicit_selection_is_kept() {
        let rpc = JsonRpcClient::new("http://127.0.0.1:1248", Duration::from_secs(5)).unwrap();
        let wallet = RpcWallet::new(rpc, Some(Address::with_last_byte(9)));
        assert_eq!(wallet.selected_address(), Some(Address::with_last_byte(9)));
    }

    #[test]
    fn no_selection_means_disconnected() {
        let rpc = JsonRpcClient::new("http://127.0.0.1:1248", Duration::from_secs(5)).unwrap();
        let wallet = RpcWallet::new(rpc, None);
        assert!(wallet.selected_address().is_none());
    }
}
