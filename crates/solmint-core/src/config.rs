use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solmint_common::constants::{DEVNET_RPC_URL, MAINNET_BETA_RPC_URL};
use std::fmt;
use std::str::FromStr;

/// Off-chain metadata the UI collects alongside the mint parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub uri: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

/// Token configuration as entered by the user.
///
/// Immutable input to one creation attempt. `initial_supply` is in whole tokens and is
/// scaled by `10^decimals` when the mint-to instruction is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_supply: Decimal,
    /// Base58 address; `None` means the creator's wallet.
    pub mint_authority: Option<String>,
    /// Base58 address; `None` means the creator's wallet.
    pub freeze_authority: Option<String>,
    #[serde(default)]
    pub metadata: TokenMetadata,
}

impl TokenConfig {
    pub fn new(name: &str, symbol: &str, decimals: u8, initial_supply: impl Into<Decimal>) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            initial_supply: initial_supply.into(),
            mint_authority: None,
            freeze_authority: None,
            metadata: TokenMetadata {
                name: name.to_string(),
                symbol: symbol.to_string(),
                ..TokenMetadata::default()
            },
        }
    }

    /// Configured mint authority; blank strings count as unset.
    pub fn configured_mint_authority(&self) -> Option<&str> {
        non_blank(self.mint_authority.as_deref())
    }

    /// Configured freeze authority; blank strings count as unset.
    pub fn configured_freeze_authority(&self) -> Option<&str> {
        non_blank(self.freeze_authority.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Cluster the token is created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC endpoint for the cluster.
    pub fn rpc_endpoint(&self) -> &'static str {
        match self {
            Network::Devnet => DEVNET_RPC_URL,
            Network::MainnetBeta => MAINNET_BETA_RPC_URL,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Network::MainnetBeta)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Network::Devnet),
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            other => Err(format!("unknown network '{}', expected devnet or mainnet-beta", other)),
        }
    }
}

/// Successful outcome of a creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationResult {
    pub token_address: String,
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_round_trips_through_wire_names() {
        assert_eq!("devnet".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("mainnet-beta".parse::<Network>().unwrap(), Network::MainnetBeta);
        assert!("testnet".parse::<Network>().is_err());
        assert_eq!(
            serde_json::to_string(&Network::MainnetBeta).unwrap(),
            "\"mainnet-beta\""
        );
    }

    #[test]
    fn endpoints_follow_network() {
        assert_eq!(Network::Devnet.rpc_endpoint(), "https://api.devnet.solana.com");
        assert!(Network::MainnetBeta.is_production());
        assert!(!Network::Devnet.is_production());
    }

    #[test]
    fn config_reads_ui_store_shape() {
        let json = r#"{
            "name": "Test Token",
            "symbol": "TEST",
            "decimals": 9,
            "initialSupply": 1000000000,
            "mintAuthority": null,
            "freezeAuthority": null,
            "metadata": {"uri": "", "name": "Test Token", "symbol": "TEST", "description": "", "image": ""}
        }"#;
        let config: TokenConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.decimals, 9);
        assert_eq!(config.initial_supply, Decimal::from(1_000_000_000u64));
        assert!(config.mint_authority.is_none());
    }
}
