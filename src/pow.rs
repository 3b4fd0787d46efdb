//! Proof-of-work parameters carried for the external prime-gap verifier
//!
//! Nothing here checks a proof. Difficulties are merit values in the
//! verifier's 48-bit fixed-point format.

pub const TWO_POW48: u64 = 1 << 48;

/// Minimum difficulty on the main network.
pub const MIN_DIFFICULTY: u64 = 16 * TWO_POW48;

/// Minimum difficulty on the test network.
pub const MIN_TEST_DIFFICULTY: u64 = TWO_POW48;

/// Per-block encoding of where the prime-gap search starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowSeed {
    pub nonce: u32,
    pub shift: u16,
    pub adder: Vec<u8>,
}

impl PowSeed {
    pub fn new(nonce: u32, shift: u16, adder: &[u8]) -> Self {
        Self {
            nonce,
            shift,
            adder: adder.to_vec(),
        }
    }
}
