//! Process-wide network selection
//!
//! The active network can only be chosen once per process, so the whole
//! startup sequence lives in a single test.

use gapnode::chainparams::{params, select_params, NetworkId};
use gapnode::error::ChainError;
use gapnode::selection::{resolve_network, select_params_from_flags};
use std::sync::Arc;

#[test]
fn test_startup_selection_sequence() -> Result<(), Box<dyn std::error::Error>> {
    // Defaults to main before anything is selected.
    assert_eq!(params()?.network_id, NetworkId::Main);

    // Conflicting flags fail without touching the active network.
    assert_eq!(
        select_params_from_flags(true, true).map(|p| p.network_id).err(),
        Some(ChainError::ConflictingNetworks)
    );
    assert_eq!(params()?.network_id, NetworkId::Main);

    let selected = select_params_from_flags(false, true)?;
    assert_eq!(selected.network_id, NetworkId::Regtest);
    assert!(Arc::ptr_eq(&selected, &params()?));

    // Selecting the same network again is harmless.
    assert_eq!(select_params(NetworkId::Regtest)?.network_id, NetworkId::Regtest);

    // Switching after startup is refused.
    assert_eq!(
        select_params(NetworkId::Testnet).map(|p| p.network_id).err(),
        Some(ChainError::AlreadySelected {
            active: NetworkId::Regtest,
            requested: NetworkId::Testnet,
        })
    );
    assert_eq!(params()?.network_id, NetworkId::Regtest);
    Ok(())
}

#[test]
fn test_resolve_network_is_pure() {
    assert_eq!(resolve_network(false, false), Ok(NetworkId::Main));
    assert_eq!(resolve_network(true, false), Ok(NetworkId::Testnet));
    assert_eq!(resolve_network(false, true), Ok(NetworkId::Regtest));
    assert_eq!(resolve_network(true, true), Err(ChainError::ConflictingNetworks));
}

#[test]
fn test_unknown_network_name() {
    assert!(matches!(
        "mainnet2".parse::<NetworkId>(),
        Err(ChainError::UnknownNetwork(_))
    ));
}
