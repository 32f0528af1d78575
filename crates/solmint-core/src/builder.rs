use rust_decimal::Decimal;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_instruction};
use solmint_common::utils::{account_utils, math_utils};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::instruction::AuthorityType;
use spl_token::solana_program::program_pack::Pack;
use std::str::FromStr;

use crate::classifier::{classify, FailureStage};
use crate::config::TokenConfig;
use crate::error::{ErrorCode, ProviderError, TokenCreationError, TokenResult};

/// How the mint and freeze authorities are assigned.
///
/// `Payer` is the long-standing behaviour: the creating wallet holds both authorities no
/// matter what the configuration says. `Configured` honours the configured addresses and
/// must be opted into explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorityMode {
    #[default]
    Payer,
    Configured,
}

/// Everything the builder decided for one mint.
#[derive(Debug, Clone)]
pub struct MintTransactionPlan {
    pub instructions: Vec<Instruction>,
    pub mint: Pubkey,
    pub associated_token_account: Pubkey,
    pub rent_lamports: u64,
    /// Base units minted to the payer, `None` when no supply is minted.
    pub mint_amount: Option<u64>,
    pub mint_authority: Pubkey,
    pub freeze_authority: Pubkey,
}

/// Build the ordered instruction list that creates and funds a new mint.
///
/// 1. create the mint account (rent-exempt, owned by the token program)
/// 2. initialise it with the payer as mint authority
/// 3. create the payer's associated token account (idempotent, so it doubles as fetch)
/// 4. mint the initial supply, only when it is positive
///
/// In [`AuthorityMode::Configured`] a mint-authority hand-over follows step 4 when the
/// configured authority is not the payer.
pub fn build_mint_transaction(
    config: &TokenConfig,
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    authority_mode: AuthorityMode,
) -> TokenResult<MintTransactionPlan> {
    let token_program = spl_token::id();
    let (final_mint_authority, freeze_authority) = match authority_mode {
        AuthorityMode::Payer => (*payer, *payer),
        AuthorityMode::Configured => (
            resolve_authority(config.configured_mint_authority(), payer, "mint")?,
            resolve_authority(config.configured_freeze_authority(), payer, "freeze")?,
        ),
    };

    let mut instructions = Vec::with_capacity(5);

    instructions.push(system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        spl_token::state::Mint::LEN as u64,
        &token_program,
    ));

    // The payer must hold the mint authority while the initial supply is minted.
    instructions.push(
        spl_token::instruction::initialize_mint(
            &token_program,
            mint,
            payer,
            Some(&freeze_authority),
            config.decimals,
        )
        .map_err(encoding_error)?,
    );

    let associated_token_account = account_utils::derive_associated_token_address(payer, mint);
    instructions.push(create_associated_token_account_idempotent(
        payer,
        payer,
        mint,
        &token_program,
    ));

    let mint_amount = if config.initial_supply > Decimal::ZERO {
        let amount = math_utils::scale_supply(config.initial_supply, config.decimals).map_err(|e| {
            TokenCreationError::new(
                format!("Invalid token configuration: initial supply cannot be minted ({})", e),
                ErrorCode::InvalidTokenConfig,
            )
            .with_detail("initial_supply", config.initial_supply.to_string())
            .with_detail("decimals", config.decimals)
        })?;
        instructions.push(
            spl_token::instruction::mint_to(
                &token_program,
                mint,
                &associated_token_account,
                payer,
                &[],
                amount,
            )
            .map_err(encoding_error)?,
        );
        Some(amount)
    } else {
        None
    };

    if final_mint_authority != *payer {
        instructions.push(
            spl_token::instruction::set_authority(
                &token_program,
                mint,
                Some(&final_mint_authority),
                AuthorityType::MintTokens,
                payer,
                &[],
            )
            .map_err(encoding_error)?,
        );
    }

    Ok(MintTransactionPlan {
        instructions,
        mint: *mint,
        associated_token_account,
        rent_lamports,
        mint_amount,
        mint_authority: final_mint_authority,
        freeze_authority,
    })
}

fn resolve_authority(configured: Option<&str>, payer: &Pubkey, which: &str) -> TokenResult<Pubkey> {
    match configured {
        None => Ok(*payer),
        Some(address) => Pubkey::from_str(address).map_err(|_| {
            TokenCreationError::new(
                format!("Invalid token configuration: {} authority is not a valid address", which),
                ErrorCode::InvalidTokenConfig,
            )
            .with_detail("address", address)
        }),
    }
}

fn encoding_error(err: impl std::fmt::Display) -> TokenCreationError {
    classify(FailureStage::Internal, &ProviderError::new(err.to_string()))
}
