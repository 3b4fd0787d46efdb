//! Block and header structures

use crate::encoding::Encodable;
use crate::hash::{sha256d, Hash256};
use crate::transaction::Transaction;

/// Block header as hashed by the chain.
///
/// `shift` and `adder` complete the proof-of-work encoding: together with
/// the header hash they seed the starting integer of the prime-gap search.
/// They are carried alongside the header but do not feed into its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub previous_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    pub difficulty: u64,
    pub nonce: u32,
    pub shift: u16,
    pub adder: Vec<u8>,
}

impl BlockHeader {
    /// Double SHA-256 over version through nonce.
    pub fn hash(&self) -> Hash256 {
        let mut data = Vec::with_capacity(84);
        data.extend_from_slice(&self.version.to_le_bytes());
        self.previous_hash.encode(&mut data);
        self.merkle_root.encode(&mut data);
        data.extend_from_slice(&self.time.to_le_bytes());
        data.extend_from_slice(&self.difficulty.to_le_bytes());
        data.extend_from_slice(&self.nonce.to_le_bytes());
        sha256d(&data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    pub fn calculate_merkle_root(transactions: &[Transaction]) -> Hash256 {
        let leaves: Vec<Hash256> = transactions.iter().map(Transaction::txid).collect();
        merkle_root(&leaves)
    }
}

/// Merkle root over `leaves`, duplicating the last node of odd-sized levels.
///
/// An empty tree has the zero hash as its root.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                let mut data = [0u8; 64];
                data[..32].copy_from_slice(left.as_bytes());
                data[32..].copy_from_slice(right.as_bytes());
                sha256d(&data)
            })
            .collect();
    }
    level[0]
}
