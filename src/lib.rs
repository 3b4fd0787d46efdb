//! gapnode - chain identity and checkpoint verification for a prime-gap
//! proof-of-work node
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Consensus Primitives
//! - [`hash`] - 256-bit digests and double SHA-256
//! - [`encoding`] - Consensus serialization
//! - [`script`] - Script building for coinbase and payout scripts
//! - [`transaction`] - Transaction types and coinbase construction
//! - [`block`] - Block headers and merkle roots
//! - [`pow`] - Proof-of-work parameters carried for the external verifier
//!
//! ## Chain Identity
//! - [`chainparams`] - Network profiles and genesis blocks
//! - [`selection`] - Network selection from startup flags
//! - [`checkpoints`] - Checkpoint enforcement and sync progress estimates
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Consensus Primitives
// ============================================================================
pub mod block;
pub mod encoding;
pub mod hash;
pub mod pow;
pub mod script;
pub mod transaction;

// ============================================================================
// Chain Identity
// ============================================================================
pub mod chainparams;
pub mod checkpoints;
pub mod selection;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
