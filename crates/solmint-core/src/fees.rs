use log::warn;
use spl_token::solana_program::program_pack::Pack;
use solmint_common::constants::{
    ESTIMATED_TOKEN_ACCOUNT_FEE_LAMPORTS, ESTIMATED_TX_FEE_LAMPORTS,
    FALLBACK_FEE_ESTIMATE_LAMPORTS,
};

use crate::error::ProviderError;
use crate::rpc::RpcConnection;

/// Rent-exempt balance of a mint account.
pub async fn mint_rent_exemption(rpc: &dyn RpcConnection) -> Result<u64, ProviderError> {
    rpc.get_minimum_balance_for_rent_exemption(spl_token::state::Mint::LEN)
        .await
}

/// Minimum lamports the payer should hold to create a token.
///
/// Mint rent plus a transaction fee estimate plus the associated token account rent.
/// Never fails: if the rent lookup errors, a conservative fixed estimate is returned so the
/// user can still attempt creation. `decimals` does not change the cost today.
pub async fn estimate_token_creation_fees(rpc: &dyn RpcConnection, _decimals: u8) -> u64 {
    match mint_rent_exemption(rpc).await {
        Ok(mint_rent) => mint_rent
            .saturating_add(ESTIMATED_TX_FEE_LAMPORTS)
            .saturating_add(ESTIMATED_TOKEN_ACCOUNT_FEE_LAMPORTS),
        Err(e) => {
            warn!("Error estimating fees, using fallback: {}", e);
            FALLBACK_FEE_ESTIMATE_LAMPORTS
        }
    }
}
