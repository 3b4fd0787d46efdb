//! Deterministic genesis block construction
//!
//! Every network anchors its identity to the hash of a block built from the
//! inputs below. Building fails when the computed hash differs from the
//! hardcoded one.

use super::network::NetworkId;
use crate::block::{Block, BlockHeader};
use crate::error::{ChainError, Result};
use crate::hash::Hash256;
use crate::pow::PowSeed;
use crate::script::{Script, OP_CHECKSIG};
use crate::transaction::{coinbase_transaction, Amount};
use tracing::debug;

pub const GENESIS_TIMESTAMP: &str = "The Times 15/Oct/2014 US data sends global stocks into tail-spin";
pub const GENESIS_TIME: u32 = 1413446400;
pub const GENESIS_BITS: i64 = 486604799;
pub const GENESIS_EXTRA_NONCE: i64 = 4;
pub const GENESIS_OUTPUT_PUBKEY: &str = "044588d54931b7de2f9faaa5a3c1fde654114ae51273754e1f3f9720127f8977af6bfaa1f33e22e80e4b83f5269921501b411d254929faf1b10d2174ded28ac59d";

pub const GENESIS_NONCE: u32 = 13370;
pub const GENESIS_SHIFT: u16 = 20;
pub const GENESIS_ADDER: [u8; 3] = [233, 156, 15];
pub const GENESIS_TN_NONCE: u32 = 1;
pub const GENESIS_TN_ADDER: [u8; 2] = [25, 1];

pub const GENESIS_HASH: &str = "a531337a2a2b6b7425debd0ce00335d1cc1e57fcf4350e6c9c568b1d6d0ad9a1";
pub const GENESIS_MERKLE: &str = "261010cfad2ae26a355e56c2551ea2cc05549df11db7f40db7c2b9e3b40e1194";
pub const GENESIS_TN_HASH: &str = "6f840633133cdb1b3077675a6b6e9eb1977409bcac7f43fc2330eca9fb4fa6eb";

/// Inputs to a network's genesis block plus the values it must hash to.
#[derive(Debug, Clone)]
pub struct GenesisSpec {
    pub network: NetworkId,
    pub timestamp: &'static str,
    pub time: u32,
    pub output_pubkey: &'static str,
    pub output_value: Amount,
    pub difficulty: u64,
    pub pow: PowSeed,
    pub expected_hash: &'static str,
    pub expected_merkle_root: Option<&'static str>,
}

impl GenesisSpec {
    /// Builds the genesis block and checks it against the expected hashes.
    pub fn build(&self) -> Result<Block> {
        let script_sig = Script::new()
            .push_int(GENESIS_BITS)
            .push_bignum(GENESIS_EXTRA_NONCE)
            .push_slice(self.timestamp.as_bytes());
        let pubkey = hex::decode(self.output_pubkey)?;
        let script_pubkey = Script::new().push_slice(&pubkey).push_opcode(OP_CHECKSIG);

        let transactions = vec![coinbase_transaction(script_sig, self.output_value, script_pubkey)];
        let merkle_root = Block::calculate_merkle_root(&transactions);

        let header = BlockHeader {
            version: 1,
            previous_hash: Hash256::ZERO,
            merkle_root,
            time: self.time,
            difficulty: self.difficulty,
            nonce: self.pow.nonce,
            shift: self.pow.shift,
            adder: self.pow.adder.clone(),
        };
        let genesis = Block { header, transactions };

        let computed = genesis.hash();
        let expected = Hash256::from_hex(self.expected_hash)?;
        if computed != expected {
            return Err(ChainError::GenesisHashMismatch {
                network: self.network,
                expected,
                computed,
            });
        }

        if let Some(expected_merkle_root) = self.expected_merkle_root {
            let expected = Hash256::from_hex(expected_merkle_root)?;
            if merkle_root != expected {
                return Err(ChainError::GenesisMerkleMismatch {
                    network: self.network,
                    expected,
                    computed: merkle_root,
                });
            }
        }

        debug!(network = %self.network, hash = %computed, "genesis block verified");
        Ok(genesis)
    }
}
