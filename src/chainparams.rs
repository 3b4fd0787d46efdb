//! Network profiles: main, test and regression-test
//!
//! Each profile is an immutable record produced by its own builder, and
//! every builder sets every field. Regtest takes its genesis block and
//! proof-of-work minimum from main but its address prefixes, empty seed
//! lists and alert key from testnet.

pub mod genesis;
pub mod network;

pub use genesis::*;
pub use network::*;

use crate::block::Block;
use crate::error::{ChainError, Result};
use crate::hash::Hash256;
use crate::pow::{PowSeed, MIN_DIFFICULTY, MIN_TEST_DIFFICULTY};
use once_cell::sync::OnceCell;
use rand::Rng;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use tracing::info;

const MAIN_ALERT_PUBKEY: &str = "04a6395c1468b52d9fd79a1092f0fe223ae8e0704bd440630ccac26b05c8d4f7f7836c4d811f915ad8000c1c171619850608e03b93ddfe4a324494c9c5b68f0993";
const TESTNET_ALERT_PUBKEY: &str = "04f122609fbdbf62e4cb5392845b7a60d22b74d075e5bb1bcc296814f720e41ad44486b57aa9c4cb758d6ac6f0c703407dcc64ed000bb7367d8c6c5bbe8b582f0f";

/// Main network IPv4 seeds as little-endian words.
const MAIN_SEEDS: [u32; 5] = [0x9b8fe3d4, 0x52458368, 0x092cd75f, 0xb324fe9b, 0xc0e27fc7];

const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Address classes that carry a base58 version prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

/// A fixed seed stamped with the "last seen" time handed to address managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAddress {
    pub addr: SocketAddr,
    pub last_seen: i64,
}

/// Everything that distinguishes one network from another.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network_id: NetworkId,
    pub message_start: [u8; 4],
    pub alert_pub_key: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    pub subsidy_halving_interval: u32,
    pub base58_prefixes: Base58Prefixes,
    pub fixed_seeds: Vec<SocketAddr>,
    pub dns_seeds: Vec<DnsSeed>,
    pub data_dir: &'static str,
    pub require_rpc_password: bool,
    pub genesis: Block,
    pub hash_genesis_block: Hash256,
}

impl ChainParams {
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Fixed seeds with a random last-seen time one to two weeks before `now`.
    pub fn fixed_seeds_last_seen<R: Rng>(&self, now: i64, rng: &mut R) -> Vec<SeedAddress> {
        self.fixed_seeds
            .iter()
            .map(|addr| SeedAddress {
                addr: *addr,
                last_seen: now - rng.gen_range(0..ONE_WEEK_SECS) - ONE_WEEK_SECS,
            })
            .collect()
    }

    /// Base58Check encoding of `payload` under this network's prefix.
    pub fn encode_base58check(&self, kind: Base58Type, payload: &[u8]) -> String {
        let mut data = self.base58_prefix(kind).to_vec();
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }

    /// Decodes a Base58Check string and identifies which prefix it carries.
    ///
    /// Longer prefixes are tried first so a four-byte extended-key version
    /// never gets mistaken for a one-byte address version.
    pub fn decode_base58check(&self, encoded: &str) -> Result<(Base58Type, Vec<u8>)> {
        let data = bs58::decode(encoded).with_check(None).into_vec()?;
        let mut kinds = Base58Type::ALL;
        kinds.sort_by_key(|kind| std::cmp::Reverse(self.base58_prefix(*kind).len()));
        for kind in kinds {
            let prefix = self.base58_prefix(kind);
            if let Some(payload) = data.strip_prefix(prefix) {
                return Ok((kind, payload.to_vec()));
            }
        }
        Err(ChainError::Base58Error(format!(
            "No {} prefix matches {}",
            self.network_id, encoded
        )))
    }
}

fn seed_addresses(seeds: &[u32], port: u16) -> Vec<SocketAddr> {
    seeds
        .iter()
        .map(|seed| SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::from(seed.to_le_bytes()), port)))
        .collect()
}

fn finish(network_id: NetworkId, genesis: Block, fields: ProfileFields) -> ChainParams {
    let hash_genesis_block = genesis.hash();
    ChainParams {
        network_id,
        message_start: fields.message_start,
        alert_pub_key: fields.alert_pub_key,
        default_port: fields.default_port,
        rpc_port: fields.rpc_port,
        subsidy_halving_interval: fields.subsidy_halving_interval,
        base58_prefixes: fields.base58_prefixes,
        fixed_seeds: fields.fixed_seeds,
        dns_seeds: fields.dns_seeds,
        data_dir: fields.data_dir,
        require_rpc_password: fields.require_rpc_password,
        genesis,
        hash_genesis_block,
    }
}

/// Non-genesis profile fields, grouped so every builder spells them all out.
struct ProfileFields {
    message_start: [u8; 4],
    alert_pub_key: Vec<u8>,
    default_port: u16,
    rpc_port: u16,
    subsidy_halving_interval: u32,
    base58_prefixes: Base58Prefixes,
    fixed_seeds: Vec<SocketAddr>,
    dns_seeds: Vec<DnsSeed>,
    data_dir: &'static str,
    require_rpc_password: bool,
}

fn main_prefixes() -> Base58Prefixes {
    Base58Prefixes {
        pubkey_address: vec![38],
        script_address: vec![5],
        secret_key: vec![97],
        ext_public_key: vec![0x04, 0x88, 0xb2, 0x1e],
        ext_secret_key: vec![0x04, 0x88, 0xad, 0xe4],
    }
}

fn testnet_prefixes() -> Base58Prefixes {
    Base58Prefixes {
        pubkey_address: vec![111],
        script_address: vec![196],
        secret_key: vec![239],
        ext_public_key: vec![0x04, 0x35, 0x87, 0xcf],
        ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
    }
}

pub fn main_params() -> Result<ChainParams> {
    let genesis = GenesisSpec {
        network: NetworkId::Main,
        timestamp: GENESIS_TIMESTAMP,
        time: GENESIS_TIME,
        output_pubkey: GENESIS_OUTPUT_PUBKEY,
        output_value: 0,
        difficulty: MIN_DIFFICULTY,
        pow: PowSeed::new(GENESIS_NONCE, GENESIS_SHIFT, &GENESIS_ADDER),
        expected_hash: GENESIS_HASH,
        expected_merkle_root: Some(GENESIS_MERKLE),
    }
    .build()?;

    let default_port = 31469;
    Ok(finish(
        NetworkId::Main,
        genesis,
        ProfileFields {
            message_start: [0xd1, 0xdf, 0xe6, 0xf9],
            alert_pub_key: hex::decode(MAIN_ALERT_PUBKEY)?,
            default_port,
            rpc_port: 31397,
            subsidy_halving_interval: 420_000,
            base58_prefixes: main_prefixes(),
            fixed_seeds: seed_addresses(&MAIN_SEEDS, default_port),
            dns_seeds: vec![DnsSeed {
                name: "gapcoin.org".to_string(),
                host: "dnsseed.gapcoin.org".to_string(),
            }],
            data_dir: "",
            require_rpc_password: true,
        },
    ))
}

pub fn testnet_params() -> Result<ChainParams> {
    let genesis = GenesisSpec {
        network: NetworkId::Testnet,
        timestamp: GENESIS_TIMESTAMP,
        time: GENESIS_TIME,
        output_pubkey: GENESIS_OUTPUT_PUBKEY,
        output_value: 0,
        difficulty: MIN_TEST_DIFFICULTY,
        pow: PowSeed::new(GENESIS_TN_NONCE, GENESIS_SHIFT, &GENESIS_TN_ADDER),
        expected_hash: GENESIS_TN_HASH,
        expected_merkle_root: None,
    }
    .build()?;

    Ok(finish(
        NetworkId::Testnet,
        genesis,
        ProfileFields {
            message_start: [0x0b, 0x11, 0x09, 0x07],
            alert_pub_key: hex::decode(TESTNET_ALERT_PUBKEY)?,
            default_port: 19661,
            rpc_port: 19609,
            subsidy_halving_interval: 420_000,
            base58_prefixes: testnet_prefixes(),
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            data_dir: "testnet3",
            require_rpc_password: true,
        },
    ))
}

pub fn regtest_params() -> Result<ChainParams> {
    // Same genesis as main, not testnet.
    let genesis = GenesisSpec {
        network: NetworkId::Regtest,
        timestamp: GENESIS_TIMESTAMP,
        time: GENESIS_TIME,
        output_pubkey: GENESIS_OUTPUT_PUBKEY,
        output_value: 0,
        difficulty: MIN_DIFFICULTY,
        pow: PowSeed::new(GENESIS_NONCE, GENESIS_SHIFT, &GENESIS_ADDER),
        expected_hash: GENESIS_HASH,
        expected_merkle_root: None,
    }
    .build()?;

    Ok(finish(
        NetworkId::Regtest,
        genesis,
        ProfileFields {
            message_start: [0xfa, 0xbf, 0xb5, 0xda],
            alert_pub_key: hex::decode(TESTNET_ALERT_PUBKEY)?,
            default_port: 18444,
            rpc_port: 19609,
            subsidy_halving_interval: 1200,
            base58_prefixes: testnet_prefixes(),
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            data_dir: "regtest",
            require_rpc_password: false,
        },
    ))
}

/// The three validated network profiles.
#[derive(Debug)]
pub struct ChainParamsRegistry {
    main: Arc<ChainParams>,
    testnet: Arc<ChainParams>,
    regtest: Arc<ChainParams>,
}

impl ChainParamsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Self {
            main: Arc::new(main_params()?),
            testnet: Arc::new(testnet_params()?),
            regtest: Arc::new(regtest_params()?),
        };
        for id in NetworkId::ALL {
            info!(network = %id, genesis = %registry.get(id).hash_genesis_block, "network profile ready");
        }
        Ok(registry)
    }

    pub fn get(&self, network: NetworkId) -> Arc<ChainParams> {
        match network {
            NetworkId::Main => Arc::clone(&self.main),
            NetworkId::Testnet => Arc::clone(&self.testnet),
            NetworkId::Regtest => Arc::clone(&self.regtest),
        }
    }
}

static REGISTRY: OnceCell<ChainParamsRegistry> = OnceCell::new();
static ACTIVE_NETWORK: OnceCell<NetworkId> = OnceCell::new();

/// Process-wide registry, built and validated on first use.
pub fn registry() -> Result<&'static ChainParamsRegistry> {
    REGISTRY.get_or_try_init(ChainParamsRegistry::new)
}

/// Sets the active network. It can be chosen once per process; selecting
/// the same network again is allowed, switching to another one is not.
pub fn select_params(network: NetworkId) -> Result<Arc<ChainParams>> {
    let registry = registry()?;
    let active = *ACTIVE_NETWORK.get_or_init(|| network);
    if active != network {
        return Err(ChainError::AlreadySelected {
            active,
            requested: network,
        });
    }
    info!(network = %network, "selected network");
    Ok(registry.get(network))
}

/// Active network profile; main when nothing has been selected.
pub fn params() -> Result<Arc<ChainParams>> {
    let network = ACTIVE_NETWORK.get().copied().unwrap_or(NetworkId::Main);
    Ok(registry()?.get(network))
}
