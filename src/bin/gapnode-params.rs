#![forbid(unsafe_code)]
//! Inspect network profiles, genesis blocks and checkpoints

use clap::{Parser, Subcommand};
use colored::*;
use gapnode::chainparams::{ChainParams, NetworkId};
use gapnode::checkpoints::{BlockIndexEntry, Checkpoints};
use gapnode::config::{load_config, load_config_from};
use gapnode::hash::Hash256;
use gapnode::selection::select_params_from_flags;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use the test network
    #[arg(long)]
    testnet: bool,
    /// Use the regression test network
    #[arg(long)]
    regtest: bool,
    /// Config file (defaults to gapnode.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Disable checkpoint enforcement
    #[arg(long)]
    no_checkpoints: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows the active network profile
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shows the genesis block of the active network
    Genesis,
    /// Checks a block hash against the checkpoint at a height
    Checkpoint {
        height: u64,
        hash: String,
    },
    /// Estimates verification progress for a chain-index entry
    Progress {
        /// Transactions in the chain up to the block
        #[arg(long)]
        chain_tx: u64,
        /// Block timestamp
        #[arg(long)]
        time: i64,
        /// Account for signature checks after the last checkpoint
        #[arg(long)]
        sigchecks: bool,
    },
}

struct CliEntry {
    chain_tx: u64,
    time: i64,
}

impl BlockIndexEntry for CliEntry {
    fn chain_tx(&self) -> u64 {
        self.chain_tx
    }

    fn time(&self) -> i64 {
        self.time
    }
}

#[derive(serde::Serialize)]
struct ProfileSummary<'a> {
    network: NetworkId,
    message_start: String,
    default_port: u16,
    rpc_port: u16,
    subsidy_halving_interval: u32,
    base58_prefixes: &'a gapnode::chainparams::Base58Prefixes,
    fixed_seeds: Vec<String>,
    dns_seeds: &'a [gapnode::chainparams::DnsSeed],
    data_dir: &'a str,
    require_rpc_password: bool,
    genesis_hash: Hash256,
    total_blocks_estimate: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    tracing_subscriber::fmt().with_max_level(config.log_level()?).init();

    let params = select_params_from_flags(
        cli.testnet || config.network.testnet,
        cli.regtest || config.network.regtest,
    )?;
    let checkpoints = Checkpoints::new(params.clone());
    checkpoints.set_enabled(config.checkpoints.enabled && !cli.no_checkpoints);

    match cli.command {
        Commands::Show { json } => show(&params, &checkpoints, json)?,
        Commands::Genesis => genesis(&params),
        Commands::Checkpoint { height, hash } => {
            let hash: Hash256 = hash.parse()?;
            if checkpoints.check_block(height, &hash) {
                println!("{} block {} at height {}", "accepted".bright_green(), hash, height);
            } else {
                println!("{} block {} at height {} conflicts with a checkpoint", "rejected".bright_red(), hash, height);
            }
        }
        Commands::Progress { chain_tx, time, sigchecks } => {
            let entry = CliEntry { chain_tx, time };
            let progress = checkpoints.guess_verification_progress(Some(&entry), sigchecks);
            println!("{:.6}", progress);
        }
    }
    Ok(())
}

fn show(params: &ChainParams, checkpoints: &Checkpoints, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = ProfileSummary {
        network: params.network_id,
        message_start: hex::encode(params.message_start),
        default_port: params.default_port,
        rpc_port: params.rpc_port,
        subsidy_halving_interval: params.subsidy_halving_interval,
        base58_prefixes: &params.base58_prefixes,
        fixed_seeds: params.fixed_seeds.iter().map(|s| s.to_string()).collect(),
        dns_seeds: &params.dns_seeds,
        data_dir: params.data_dir,
        require_rpc_password: params.require_rpc_password,
        genesis_hash: params.hash_genesis_block,
        total_blocks_estimate: checkpoints.total_blocks_estimate(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", format!("Network: {}", summary.network).bright_cyan().bold());
    println!("  Message start:     {}", summary.message_start);
    println!("  Ports (p2p/rpc):   {}/{}", summary.default_port, summary.rpc_port);
    println!("  Halving interval:  {}", summary.subsidy_halving_interval);
    println!("  Data dir suffix:   {}", if summary.data_dir.is_empty() { "(none)" } else { summary.data_dir });
    println!("  RPC password:      {}", if summary.require_rpc_password { "required" } else { "optional" });
    println!("  Fixed seeds:       {}", summary.fixed_seeds.len());
    println!("  DNS seeds:         {}", summary.dns_seeds.len());
    println!("  Genesis:           {}", summary.genesis_hash.to_string().bright_white());
    println!("  Last checkpoint:   {}", summary.total_blocks_estimate);
    Ok(())
}

fn genesis(params: &ChainParams) {
    let header = &params.genesis.header;
    println!("{}", format!("Genesis block ({})", params.network_id).bright_cyan().bold());
    println!("  Hash:        {}", header.hash());
    println!("  Merkle root: {}", header.merkle_root);
    println!("  Version:     {}", header.version);
    println!("  Time:        {}", header.time);
    println!("  Difficulty:  {}", header.difficulty);
    println!("  Nonce:       {}", header.nonce);
    println!("  Shift:       {}", header.shift);
    println!("  Adder:       {}", hex::encode(&header.adder));
}
