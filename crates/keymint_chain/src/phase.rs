use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Sale stage tracked by the contract's `mintState()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintPhase {
    Og = 0,
    Whitelist = 1,
    Public = 2,
}

impl MintPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MintPhase::Og => "OG",
            MintPhase::Whitelist => "Presale",
            MintPhase::Public => "Public",
        }
    }

    /// OG and whitelist phases are both gated by an allowlist.
    pub fn is_presale(&self) -> bool {
        !matches!(self, MintPhase::Public)
    }
}

impl TryFrom<u8> for MintPhase {
    type Error = ChainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MintPhase::Og),
            1 => Ok(MintPhase::Whitelist),
            2 => Ok(MintPhase::Public),
            other => Err(ChainError::UnknownMintState(other)),
        }
    }
}

impl fmt::Display for MintPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
