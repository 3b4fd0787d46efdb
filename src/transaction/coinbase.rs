use crate::script::Script;

use super::types::{Amount, OutPoint, Transaction, TxIn, TxOut};

pub const SEQUENCE_FINAL: u32 = u32::MAX;

/// Builds a single-input, single-output coinbase transaction.
pub fn coinbase_transaction(script_sig: Script, value: Amount, script_pubkey: Script) -> Transaction {
    Transaction {
        version: 1,
        inputs: vec![TxIn {
            prevout: OutPoint::NULL,
            script_sig,
            sequence: SEQUENCE_FINAL,
        }],
        outputs: vec![TxOut {
            value,
            script_pubkey,
        }],
        lock_time: 0,
    }
}
