//! Choosing the network from startup flags

use crate::chainparams::{self, ChainParams, NetworkId};
use crate::error::{ChainError, Result};
use std::sync::Arc;

/// Resolves the `-testnet` / `-regtest` flags to a network.
///
/// Asking for both is an error the caller reports before exiting.
pub fn resolve_network(testnet: bool, regtest: bool) -> Result<NetworkId> {
    match (testnet, regtest) {
        (true, true) => Err(ChainError::ConflictingNetworks),
        (_, true) => Ok(NetworkId::Regtest),
        (true, false) => Ok(NetworkId::Testnet),
        (false, false) => Ok(NetworkId::Main),
    }
}

/// Resolves the flags and makes the result the process-wide active network.
pub fn select_params_from_flags(testnet: bool, regtest: bool) -> Result<Arc<ChainParams>> {
    let network = resolve_network(testnet, regtest)?;
    chainparams::select_params(network)
}
