use crate::error::ChainError;
use std::fmt;
use std::str::FromStr;

/// The networks a node can run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Main,
    Testnet,
    Regtest,
}

impl NetworkId {
    pub const ALL: [NetworkId; 3] = [NetworkId::Main, NetworkId::Testnet, NetworkId::Regtest];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Testnet => "test",
            NetworkId::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" | "testnet3" => Ok(NetworkId::Testnet),
            "regtest" => Ok(NetworkId::Regtest),
            other => Err(ChainError::UnknownNetwork(other.to_string())),
        }
    }
}

impl TryFrom<u8> for NetworkId {
    type Error = ChainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NetworkId::Main),
            1 => Ok(NetworkId::Testnet),
            2 => Ok(NetworkId::Regtest),
            n => Err(ChainError::UnknownNetwork(n.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("main".parse::<NetworkId>().unwrap(), NetworkId::Main);
        assert_eq!("TESTNET".parse::<NetworkId>().unwrap(), NetworkId::Testnet);
        assert_eq!("regtest".parse::<NetworkId>().unwrap(), NetworkId::Regtest);
        assert_eq!(
            "signet".parse::<NetworkId>(),
            Err(ChainError::UnknownNetwork("signet".to_string()))
        );
    }

    #[test]
    fn test_numeric_ids() {
        for (i, id) in NetworkId::ALL.iter().enumerate() {
            assert_eq!(NetworkId::try_from(i as u8).unwrap(), *id);
        }
        assert!(matches!(NetworkId::try_from(3), Err(ChainError::UnknownNetwork(_))));
    }
}
