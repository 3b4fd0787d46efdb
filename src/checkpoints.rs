//! Hardcoded checkpoints
//!
//! A checkpoint pins the block hash at a height. Blocks that disagree with a
//! checkpoint are rewriting finalized history and get rejected. The same
//! tables bound how much work is left during initial sync.

pub mod progress;

pub use progress::*;

use crate::chainparams::{ChainParams, NetworkId, GENESIS_HASH, GENESIS_TIME, GENESIS_TN_HASH};
use crate::hash::Hash256;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Checkpoint table for one network plus the figures used for sync estimates.
#[derive(Debug, Clone)]
pub struct CheckpointData {
    pub checkpoints: BTreeMap<u64, Hash256>,
    /// UNIX timestamp of the last checkpoint block.
    pub time_last_checkpoint: i64,
    /// Total transactions between genesis and the last checkpoint.
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint.
    pub transactions_per_day: f64,
}

impl CheckpointData {
    pub fn for_network(network: NetworkId) -> &'static CheckpointData {
        match network {
            NetworkId::Main => &MAIN_CHECKPOINTS,
            NetworkId::Testnet => &TESTNET_CHECKPOINTS,
            NetworkId::Regtest => &REGTEST_CHECKPOINTS,
        }
    }
}

fn table(entries: &[(u64, &str)]) -> BTreeMap<u64, Hash256> {
    entries
        .iter()
        .map(|(height, hash)| (*height, Hash256::from_hex(hash).expect("checkpoint literal is valid hex")))
        .collect()
}

static MAIN_CHECKPOINTS: Lazy<CheckpointData> = Lazy::new(|| CheckpointData {
    checkpoints: table(&[
        (0, GENESIS_HASH),
        (14738, "ce083f91261ea327c2e3b855ba3df7bb696010fec985ab8b5c699b5df3edcd27"),
        (28592, "ee7852b7dfa68f86dd272f25899bea9cc9ea993c33a621d78b49ec96defc50c7"),
        (39229, "b94e3f013746985b122fc121d7cbe707fa3798cbb756337a5f051e2b0dec3a52"),
        (42132, "945512bd3775afec9be70503302f230c3d5f678305fcc7225c3a6ca754ce296c"),
    ]),
    time_last_checkpoint: 1419774064,
    transactions_last_checkpoint: 81609,
    transactions_per_day: 1450.0,
});

static TESTNET_CHECKPOINTS: Lazy<CheckpointData> = Lazy::new(|| CheckpointData {
    checkpoints: table(&[(0, GENESIS_TN_HASH)]),
    time_last_checkpoint: GENESIS_TIME as i64,
    transactions_last_checkpoint: 0,
    transactions_per_day: 0.0,
});

static REGTEST_CHECKPOINTS: Lazy<CheckpointData> = Lazy::new(|| CheckpointData {
    checkpoints: table(&[(0, GENESIS_HASH)]),
    time_last_checkpoint: 0,
    transactions_last_checkpoint: 0,
    transactions_per_day: 0.0,
});

/// What the checkpoint logic needs from a chain-index entry.
pub trait BlockIndexEntry {
    /// Transactions in the chain up to and including this block.
    fn chain_tx(&self) -> u64;
    /// Block timestamp.
    fn time(&self) -> i64;
}

impl<T: BlockIndexEntry + ?Sized> BlockIndexEntry for &T {
    fn chain_tx(&self) -> u64 {
        (**self).chain_tx()
    }

    fn time(&self) -> i64 {
        (**self).time()
    }
}

impl<T: BlockIndexEntry + ?Sized> BlockIndexEntry for Arc<T> {
    fn chain_tx(&self) -> u64 {
        (**self).chain_tx()
    }

    fn time(&self) -> i64 {
        (**self).time()
    }
}

/// Checkpoint queries for the network a profile belongs to.
///
/// Checking can be switched off at runtime; readers may observe the switch
/// one call late.
#[derive(Debug)]
pub struct Checkpoints {
    params: Arc<ChainParams>,
    enabled: AtomicBool,
}

impl Checkpoints {
    pub fn new(params: Arc<ChainParams>) -> Self {
        Self {
            params,
            enabled: AtomicBool::new(true),
        }
    }

    pub fn params(&self) -> &Arc<ChainParams> {
        &self.params
    }

    pub fn data(&self) -> &'static CheckpointData {
        CheckpointData::for_network(self.params.network_id)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// False only when a checkpoint exists at `height` with a different hash.
    pub fn check_block(&self, height: u64, hash: &Hash256) -> bool {
        if !self.is_enabled() {
            return true;
        }
        match self.data().checkpoints.get(&height) {
            None => true,
            Some(expected) if expected == hash => true,
            Some(expected) => {
                warn!(
                    network = %self.params.network_id,
                    height,
                    %expected,
                    got = %hash,
                    "block conflicts with checkpoint"
                );
                false
            }
        }
    }

    /// Height of the last checkpoint, or 0 when checking is disabled.
    pub fn total_blocks_estimate(&self) -> u64 {
        if !self.is_enabled() {
            return 0;
        }
        self.data().checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// Most recent checkpoint present in `block_index`.
    pub fn last_checkpoint<'a, N>(&self, block_index: &'a HashMap<Hash256, N>) -> Option<&'a N> {
        if !self.is_enabled() {
            return None;
        }
        self.data()
            .checkpoints
            .values()
            .rev()
            .find_map(|hash| block_index.get(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::registry;

    fn checkpoints(network: NetworkId) -> Checkpoints {
        Checkpoints::new(registry().unwrap().get(network))
    }

    #[test]
    fn test_genesis_checkpoints_match_profiles() {
        for network in NetworkId::ALL {
            let store = checkpoints(network);
            let genesis = store.params().hash_genesis_block;
            assert_eq!(store.data().checkpoints.get(&0), Some(&genesis), "{}", network);
            assert!(store.check_block(0, &genesis));
        }
    }

    #[test]
    fn test_heights_strictly_increase() {
        for network in NetworkId::ALL {
            let heights: Vec<u64> = CheckpointData::for_network(network).checkpoints.keys().copied().collect();
            assert!(heights.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_toggle() {
        let store = checkpoints(NetworkId::Main);
        let bogus = Hash256::from_bytes([1u8; 32]);
        assert!(!store.check_block(14738, &bogus));
        store.set_enabled(false);
        assert!(store.check_block(14738, &bogus));
        store.set_enabled(true);
        assert!(!store.check_block(14738, &bogus));
    }
}
