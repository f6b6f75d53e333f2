//! Allowlist Merkle trees.
//!
//! Leaves are `keccak256(address)` over the 20 raw address bytes. Interior
//! nodes hash the two children in ascending byte order, so a proof is a plain
//! list of siblings with no left/right flags; this is the layout checked by
//! OpenZeppelin's `MerkleProof.verify`. An unpaired node at the end of a level
//! is carried up unchanged.

use std::path::Path;

use alloy_primitives::{Address, B256, keccak256};
use anyhow::{Context, Result};
use tracing::info;

use crate::phase::MintPhase;

/// Merkle leaf for an address.
pub fn leaf_for(address: &Address) -> B256 {
    keccak256(address.as_slice())
}

fn hash_pair(a: B256, b: B256) -> B256 {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_slice());
    buf[32..].copy_from_slice(right.as_slice());
    keccak256(buf)
}

// ---------------------------------------------------------------------------
// AllowlistTree
// ---------------------------------------------------------------------------

/// A fully materialized sorted-pair Merkle tree.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    layers: Vec<Vec<B256>>,
}

impl AllowlistTree {
    pub fn from_addresses(addresses: &[Address]) -> Self {
        Self::from_leaves(addresses.iter().map(leaf_for).collect())
    }

    pub fn from_leaves(leaves: Vec<B256>) -> Self {
        let mut layers = vec![leaves];
        loop {
            let level = &layers[layers.len() - 1];
            if level.len() <= 1 {
                break;
            }
            let next: Vec<B256> = level
                .chunks(2)
                .map(|pair| {
                    if pair.len() == 2 {
                        hash_pair(pair[0], pair[1])
                    } else {
                        pair[0]
                    }
                })
                .collect();
            layers.push(next);
        }
        Self { layers }
    }

    /// Tree root; zero for an empty tree.
    pub fn root(&self) -> B256 {
        self.layers
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(B256::ZERO)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, leaf: &B256) -> bool {
        self.layers.first().is_some_and(|leaves| leaves.contains(leaf))
    }

    /// Sibling path for `leaf`, bottom-up. Empty if the leaf is not in the tree.
    pub fn proof(&self, leaf: &B256) -> Vec<B256> {
        let Some(mut index) = self
            .layers
            .first()
            .and_then(|leaves| leaves.iter().position(|l| l == leaf))
        else {
            return Vec::new();
        };

        let mut proof = Vec::new();
        for level in &self.layers[..self.layers.len() - 1] {
            let sibling = if index % 2 == 1 { index - 1 } else { index + 1 };
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            index /= 2;
        }
        proof
    }

    pub fn proof_for(&self, address: &Address) -> Vec<B256> {
        self.proof(&leaf_for(address))
    }

    /// Checks `proof` for `leaf` against `root`.
    pub fn verify(proof: &[B256], leaf: B256, root: B256) -> bool {
        proof.iter().fold(leaf, |acc, sibling| hash_pair(acc, *sibling)) == root
    }

    /// Derives and locally verifies the proof for `address`.
    /// Returns `None` when the address is not on the list.
    pub fn membership_proof(&self, address: &Address) -> Option<Vec<B256>> {
        if self.is_empty() {
            return None;
        }
        let leaf = leaf_for(address);
        let proof = self.proof(&leaf);
        Self::verify(&proof, leaf, self.root()).then_some(proof)
    }
}

// ---------------------------------------------------------------------------
// Address list files
// ---------------------------------------------------------------------------

/// Parse an address list: a JSON array of strings, or one address per line
/// with blank lines and `#` comments ignored.
pub fn parse_address_list(content: &str) -> Result<Vec<Address>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let entries: Vec<String> =
            serde_json::from_str(trimmed).context("address list is not a JSON string array")?;
        return entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .trim()
                    .parse::<Address>()
                    .with_context(|| format!("entry {i}: invalid address {entry:?}"))
            })
            .collect();
    }

    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((i, line))
        })
        .map(|(i, line)| {
            line.parse::<Address>()
                .with_context(|| format!("line {}: invalid address {line:?}", i + 1))
        })
        .collect()
}

pub fn load_address_list(path: &Path) -> Result<Vec<Address>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read address list: {}", path.display()))?;
    parse_address_list(&content).with_context(|| format!("In {}", path.display()))
}

// ---------------------------------------------------------------------------
// Allowlists
// ---------------------------------------------------------------------------

/// The two allowlist trees: whitelist ("KeyList") and OG ("MasterKey").
/// Built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Allowlists {
    pub whitelist: AllowlistTree,
    pub og: AllowlistTree,
}

impl Allowlists {
    pub fn new(whitelist: &[Address], og: &[Address]) -> Self {
        Self {
            whitelist: AllowlistTree::from_addresses(whitelist),
            og: AllowlistTree::from_addresses(og),
        }
    }

    pub fn load(whitelist_path: &Path, og_path: &Path) -> Result<Self> {
        let whitelist = load_address_list(whitelist_path)?;
        let og = load_address_list(og_path)?;
        let lists = Self::new(&whitelist, &og);
        info!(
            whitelist = lists.whitelist.len(),
            whitelist_root = %lists.whitelist.root(),
            og = lists.og.len(),
            og_root = %lists.og.root(),
            "allowlists loaded"
        );
        Ok(lists)
    }

    /// The tree gating a presale phase: OG list for OG, whitelist otherwise.
    pub fn tree_for(&self, phase: MintPhase) -> &AllowlistTree {
        match phase {
            MintPhase::Og => &self.og,
            MintPhase::Whitelist | MintPhase::Public => &self.whitelist,
        }
    }
}
