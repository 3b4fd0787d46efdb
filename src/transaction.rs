//! Transaction module split into types and coinbase construction

pub mod coinbase;
pub mod types;

pub use coinbase::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encodable;
    use crate::hash::Hash256;
    use crate::script::{Script, OP_CHECKSIG};

    #[test]
    fn test_coinbase_has_null_prevout() {
        let tx = coinbase_transaction(Script::new().push_int(42), 0, Script::new());
        assert!(tx.is_coinbase());
        assert!(tx.inputs[0].prevout.is_null());
        assert_eq!(tx.inputs[0].sequence, SEQUENCE_FINAL);
        assert_eq!(tx.outputs.len(), 1);
    }

    #[test]
    fn test_spending_tx_is_not_coinbase() {
        let mut tx = coinbase_transaction(Script::new(), 0, Script::new());
        tx.inputs[0].prevout = OutPoint {
            txid: Hash256::from_bytes([7u8; 32]),
            vout: 0,
        };
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn test_serialized_layout() {
        let tx = coinbase_transaction(
            Script::new().push_bignum(4),
            50 * COIN,
            Script::new().push_opcode(OP_CHECKSIG),
        );
        let bytes = tx.serialize();

        // version
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        // one input, null prevout
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..37], &[0u8; 32]);
        assert_eq!(&bytes[37..41], &[0xff; 4]);
        // scriptSig: length 2, push of [0x04]
        assert_eq!(&bytes[41..44], &[2, 0x01, 0x04]);
        assert_eq!(&bytes[44..48], &[0xff; 4]);
        // one output with 50 coins
        assert_eq!(bytes[48], 1);
        assert_eq!(&bytes[49..57], &(50 * COIN).to_le_bytes());
        assert_eq!(&bytes[57..59], &[1, OP_CHECKSIG]);
        // lock time
        assert_eq!(&bytes[59..], &[0, 0, 0, 0]);
        assert_eq!(tx.txid(), crate::hash::sha256d(&bytes));
    }
}
