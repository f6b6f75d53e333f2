use std::time::Duration;

use alloy_primitives::{Address, B256};
use alloy_primitives::utils::format_ether;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use keymint_chain::{
    Allowlists, AllowlistTree, JsonRpcClient, MintPhase, MintSettings, Minter, NftContract,
    RpcConfigStore, RpcWallet, leaf_for,
};
use keymint_core::KeymintConfig;

/// Wallets wait on the user to approve, so allow far longer than a node read.
const WALLET_TIMEOUT_SECS: u64 = 300;

#[derive(Args, Debug)]
pub struct ProofArgs {
    /// Address to prove membership for
    pub address: Address,

    /// Use the OG (MasterKey) list instead of the whitelist
    #[arg(long)]
    pub og: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MintKind {
    Presale,
    Public,
}

#[derive(Args, Debug)]
pub struct MintArgs {
    #[arg(value_enum)]
    pub kind: MintKind,

    /// Number of tokens to mint
    #[arg(short, long, default_value_t = 1)]
    pub amount: u64,

    /// Account to mint from; defaults to the wallet's first account
    #[arg(long)]
    pub from: Option<Address>,
}

fn contract(config: &KeymintConfig) -> Result<NftContract<JsonRpcClient>> {
    config.validate()?;
    let store = RpcConfigStore::from_config(config)?;
    let client = store.client_for(config.chain)?;
    Ok(NftContract::new(config.contract_address, client))
}

fn allowlists(config: &KeymintConfig) -> Result<Allowlists> {
    Allowlists::load(&config.whitelist_path, &config.og_path)
}

pub async fn status(config: &KeymintConfig) -> Result<()> {
    let nft = contract(config)?;

    let minted = nft.total_minted().await?;
    let max = nft.max_supply().await?;
    let paused = nft.is_paused().await?;
    let phase = nft.mint_state().await?;
    let price = nft.price_for_phase(phase).await?;
    let limit = nft.limit_for_phase(phase).await?;

    println!("Contract:  {} ({})", nft.address(), config.chain);
    println!("Minted:    {minted} / {max}");
    println!("Paused:    {paused}");
    println!("Phase:     {phase}");
    println!("Price:     {} ETH", format_ether(price));
    println!("Limit:     {limit} per wallet");
    Ok(())
}

pub fn root(config: &KeymintConfig) -> Result<()> {
    let lists = allowlists(config)?;
    println!(
        "KeyList   ({} addresses): {}",
        lists.whitelist.len(),
        lists.whitelist.root()
    );
    println!(
        "MasterKey ({} addresses): {}",
        lists.og.len(),
        lists.og.root()
    );
    Ok(())
}

pub fn proof(config: &KeymintConfig, args: &ProofArgs) -> Result<()> {
    let lists = allowlists(config)?;
    let phase = if args.og { MintPhase::Og } else { MintPhase::Whitelist };
    let tree = lists.tree_for(phase);

    let leaf = leaf_for(&args.address);
    let proof = tree.proof(&leaf);
    let valid = !tree.is_empty() && AllowlistTree::verify(&proof, leaf, tree.root());

    let output = render_proof(&args.address, &leaf.to_string(), &proof, valid);
    println!("{output}");
    if !valid {
        anyhow::bail!("{} is not on the {} list", args.address, phase);
    }
    Ok(())
}

fn render_proof(
    address: &Address,
    leaf: &str,
    proof: &[B256],
    valid: bool,
) -> String {
    let proof: Vec<String> = proof.iter().map(ToString::to_string).collect();
    let mut lines = vec![
        format!("address: {address}"),
        format!("leaf:    {leaf}"),
        format!("valid:   {valid}"),
        "proof:".to_string(),
    ];
    lines.extend(proof.into_iter().map(|p| format!("  {p}")));
    lines.join("\n")
}

pub async fn mint(config: &KeymintConfig, args: &MintArgs) -> Result<()> {
    let nft = contract(config)?;
    let lists = allowlists(config)?;
    let settings = MintSettings::from_config(config)?;

    let wallet_rpc = JsonRpcClient::new(
        config.wallet_url.clone(),
        Duration::from_secs(WALLET_TIMEOUT_SECS),
    )
    .context("wallet endpoint")?;
    let wallet = match args.from {
        Some(from) => RpcWallet::new(wallet_rpc, Some(from)),
        None => RpcWallet::connect(wallet_rpc)
            .await
            .context("failed to query wallet accounts")?,
    };

    let minter = Minter::new(nft, wallet, lists, settings);
    info!(kind = ?args.kind, amount = args.amount, "starting mint");
    let outcome = match args.kind {
        MintKind::Presale => minter.presale_mint(args.amount).await?,
        MintKind::Public => minter.public_mint(args.amount).await?,
    };

    println!("{}", outcome.status);
    if !outcome.success {
        anyhow::bail!("mint was not submitted");
    }
    Ok(())
}
