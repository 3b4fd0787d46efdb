//! Checkpoint enforcement and verification progress estimates

use gapnode::chainparams::{registry, NetworkId};
use gapnode::checkpoints::{BlockIndexEntry, CheckpointData, Checkpoints};
use gapnode::hash::Hash256;
use quickcheck_macros::quickcheck;
use std::collections::HashMap;

const MAIN_14738: &str = "ce083f91261ea327c2e3b855ba3df7bb696010fec985ab8b5c699b5df3edcd27";
const MAIN_39229: &str = "b94e3f013746985b122fc121d7cbe707fa3798cbb756337a5f051e2b0dec3a52";
const MAIN_42132: &str = "945512bd3775afec9be70503302f230c3d5f678305fcc7225c3a6ca754ce296c";

#[derive(Debug, Clone, PartialEq)]
struct IndexNode {
    height: u64,
    chain_tx: u64,
    time: i64,
}

impl BlockIndexEntry for IndexNode {
    fn chain_tx(&self) -> u64 {
        self.chain_tx
    }

    fn time(&self) -> i64 {
        self.time
    }
}

fn store(network: NetworkId) -> Checkpoints {
    Checkpoints::new(registry().expect("profiles build").get(network))
}

fn node(height: u64) -> IndexNode {
    IndexNode {
        height,
        chain_tx: height * 2,
        time: 1_419_000_000 + height as i64,
    }
}

#[test]
fn test_recorded_checkpoint_accepts_only_its_hash() -> Result<(), Box<dyn std::error::Error>> {
    let main = store(NetworkId::Main);
    let recorded = Hash256::from_hex(MAIN_14738)?;
    assert!(main.check_block(14738, &recorded));
    assert!(!main.check_block(14738, &Hash256::ZERO));
    assert!(!main.check_block(14738, &Hash256::from_hex(MAIN_42132)?));
    Ok(())
}

#[test]
fn test_disabled_store_accepts_everything() -> Result<(), Box<dyn std::error::Error>> {
    let main = store(NetworkId::Main);
    main.set_enabled(false);
    assert!(main.check_block(14738, &Hash256::ZERO));
    assert!(main.check_block(0, &Hash256::from_bytes([0xab; 32])));
    assert_eq!(main.total_blocks_estimate(), 0);
    let mut index = HashMap::new();
    index.insert(Hash256::from_hex(MAIN_42132)?, node(42132));
    assert_eq!(main.last_checkpoint(&index), None);
    Ok(())
}

#[test]
fn test_total_blocks_estimate() {
    assert_eq!(store(NetworkId::Main).total_blocks_estimate(), 42132);
    assert_eq!(store(NetworkId::Testnet).total_blocks_estimate(), 0);
    assert_eq!(store(NetworkId::Regtest).total_blocks_estimate(), 0);
}

#[test]
fn test_last_checkpoint_none_without_match() {
    let main = store(NetworkId::Main);
    let mut index = HashMap::new();
    index.insert(Hash256::from_bytes([3u8; 32]), node(5));
    assert_eq!(main.last_checkpoint(&index), None);
    assert_eq!(main.last_checkpoint::<IndexNode>(&HashMap::new()), None);
}

#[test]
fn test_last_checkpoint_prefers_highest() -> Result<(), Box<dyn std::error::Error>> {
    let main = store(NetworkId::Main);
    let mut index = HashMap::new();
    index.insert(main.params().hash_genesis_block, node(0));
    index.insert(Hash256::from_hex(MAIN_14738)?, node(14738));
    index.insert(Hash256::from_hex(MAIN_39229)?, node(39229));
    index.insert(Hash256::from_bytes([9u8; 32]), node(50_000));

    let found = main.last_checkpoint(&index).map(|n| n.height);
    assert_eq!(found, Some(39229));
    Ok(())
}

#[test]
fn test_regtest_checkpoint_is_main_genesis() {
    let regtest = store(NetworkId::Regtest);
    let main = store(NetworkId::Main);
    assert!(regtest.check_block(0, &main.params().hash_genesis_block));
    let testnet_genesis = store(NetworkId::Testnet).params().hash_genesis_block;
    assert!(!regtest.check_block(0, &testnet_genesis));
}

#[quickcheck]
fn prop_unrecorded_heights_always_pass(height: u64, bytes: Vec<u8>) -> bool {
    let mut raw = [0u8; 32];
    for (slot, b) in raw.iter_mut().zip(bytes) {
        *slot = b;
    }
    let hash = Hash256::from_bytes(raw);
    NetworkId::ALL.iter().all(|network| {
        let checkpoints = &CheckpointData::for_network(*network).checkpoints;
        checkpoints.contains_key(&height) || store(*network).check_block(height, &hash)
    })
}

#[quickcheck]
fn prop_progress_in_unit_range(chain_tx: u32, time: u32, now: u32, sigchecks: bool) -> bool {
    let main = store(NetworkId::Main);
    let entry = IndexNode {
        height: 0,
        chain_tx: chain_tx as u64,
        time: time as i64,
    };
    let progress = main.guess_verification_progress_at(Some(&entry), sigchecks, now as i64);
    (0.0..=1.0).contains(&progress)
}

#[quickcheck]
fn prop_progress_monotonic_in_chain_tx(a: u32, b: u32, age: u16, sigchecks: bool) -> bool {
    let main = store(NetworkId::Main);
    let last = main.data().time_last_checkpoint;
    // Blocks past the last checkpoint are never older than it.
    let time = last + age as i64;
    let now = last + 400 * 86400;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let at = |chain_tx: u32| {
        let entry = IndexNode {
            height: 0,
            chain_tx: chain_tx as u64,
            time,
        };
        main.guess_verification_progress_at(Some(&entry), sigchecks, now)
    };
    at(lo) <= at(hi) + 1e-12
}
