use log::warn;
use solana_sdk::pubkey::Pubkey;
use solmint_common::constants::EXPLORER_BASE_URL;
use spl_token::solana_program::program_pack::Pack;
use std::str::FromStr;

use crate::config::Network;
use crate::rpc::RpcConnection;

fn cluster_param(network: Network) -> &'static str {
    if network.is_production() {
        ""
    } else {
        "?cluster=devnet"
    }
}

pub fn token_explorer_url(token_address: &str, network: Network) -> String {
    format!(
        "{}/address/{}{}",
        EXPLORER_BASE_URL,
        token_address,
        cluster_param(network)
    )
}

pub fn transaction_explorer_url(signature: &str, network: Network) -> String {
    format!(
        "{}/tx/{}{}",
        EXPLORER_BASE_URL,
        signature,
        cluster_param(network)
    )
}

/// Whether `token_address` holds an initialised SPL mint. Any failure reads as "no".
pub async fn check_token_exists(rpc: &dyn RpcConnection, token_address: &str) -> bool {
    let Ok(pubkey) = Pubkey::from_str(token_address) else {
        warn!("Not a valid token address: {}", token_address);
        return false;
    };
    match rpc.get_account_data(&pubkey).await {
        Ok(Some(data)) => spl_token::state::Mint::unpack(&data).is_ok(),
        Ok(None) => false,
        Err(e) => {
            warn!("Error checking if token exists: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devnet_urls_carry_cluster_param() {
        assert_eq!(
            token_explorer_url("Mint111", Network::Devnet),
            "https://explorer.solana.com/address/Mint111?cluster=devnet"
        );
        assert_eq!(
            transaction_explorer_url("Sig111", Network::Devnet),
            "https://explorer.solana.com/tx/Sig111?cluster=devnet"
        );
    }

    #[test]
    fn mainnet_urls_have_no_query() {
        assert_eq!(
            token_explorer_url("Mint111", Network::MainnetBeta),
            "https://explorer.solana.com/address/Mint111"
        );
        assert_eq!(
            transaction_explorer_url("Sig111", Network::MainnetBeta),
            "https://explorer.solana.com/tx/Sig111"
        );
    }
}
