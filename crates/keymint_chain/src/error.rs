/// Errors returned by chain reads and wallet calls.
///
/// Mint gating failures are not errors; they are reported through
/// [`MintOutcome`](crate::mint::MintOutcome).
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("ABI decode error: {0}")]
    Decode(String),

    #[error("Unknown mint state: {0}")]
    UnknownMintState(u8),

    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ChainError::Network(format!("request timed out: {e}"))
        } else {
            ChainError::Network(e.to_string())
        }
    }
}
