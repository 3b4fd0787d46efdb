//! Consensus serialization
//!
//! Bitcoin-style encoding: fixed-width integers are little-endian and
//! variable-length collections are prefixed with a CompactSize count.
//! Only encoding is needed here; everything this crate serializes is
//! hashed, never read back off the wire.

use crate::hash::{sha256d, Hash256};

/// Types with a canonical consensus byte encoding.
pub trait Encodable {
    fn encode(&self, out: &mut Vec<u8>);

    fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }

    /// Double SHA-256 of the consensus encoding.
    fn consensus_hash(&self) -> Hash256 {
        sha256d(&self.serialize())
    }
}

/// Writes a CompactSize length prefix.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Writes a length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

impl Encodable for Hash256 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.len() as u64);
        for item in self {
            item.encode(out);
        }
    }
}
