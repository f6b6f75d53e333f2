//! JSON-RPC transport for reading chain state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ChainError;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Read-only node access used by the contract reader and the mint flow.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// `eth_call` against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;

    /// Native currency balance in wei.
    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError>;

    /// Transaction count at the latest block, i.e. the next nonce.
    async fn get_transaction_count(&self, owner: Address) -> Result<U256, ChainError>;
}

// ---------------------------------------------------------------------------
// Wire types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

fn decode_response<T: DeserializeOwned>(method: &str, response: RpcResponse) -> Result<T, ChainError> {
    if let Some(err) = response.error {
        return Err(ChainError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    let result = response
        .result
        .filter(|v| !v.is_null())
        .ok_or_else(|| ChainError::InvalidResponse(format!("{method}: missing result")))?;
    serde_json::from_value(result)
        .map_err(|e| ChainError::InvalidResponse(format!("{method}: {e}")))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Minimal JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let url = url.into();
        if !keymint_core::validate_url(&url) {
            return Err(ChainError::Network(format!("invalid RPC URL: {url}")));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a single JSON-RPC request and deserialize its `result`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(url = %self.url, method, id, "rpc request");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(method, status = %status, "rpc request rejected");
            return Err(ChainError::Network(format!(
                "{method} returned HTTP {status}: {}",
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("{method}: {e}")))?;
        decode_response(method, parsed)
    }
}

#[async_trait]
impl EthRpc for JsonRpcClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, ChainError> {
        self.request("eth_getBalance", json!([owner, "latest"])).await
    }

    async fn get_transaction_count(&self, owner: Address) -> Result<U256, ChainError> {
        self.request("eth_getTransactionCount", json!([owner, "latest"]))
            .await
    }
}
