use log::{debug, info};
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::classifier::{classify, FailureStage};
use crate::error::{ErrorCode, ProviderError, TokenCreationError, TokenResult};
use crate::rpc::RpcConnection;
use crate::wallet::{SigningMethod, Wallet};

/// Sign `instructions` with the mint keypair and the wallet, then broadcast once.
///
/// The mint keypair signs first because the new mint account must authorise its own
/// creation. The wallet is prompted exactly once, with its preferred method.
pub async fn submit_transaction(
    rpc: &dyn RpcConnection,
    wallet: &Wallet<'_>,
    instructions: &[Instruction],
    mint_keypair: &Keypair,
) -> TokenResult<Signature> {
    let blockhash = rpc
        .get_latest_blockhash()
        .await
        .map_err(|e| classify(FailureStage::RpcQuery, &e))?;

    let mut transaction = Transaction::new_with_payer(instructions, Some(&wallet.public_key));
    transaction
        .try_partial_sign(&[mint_keypair], blockhash)
        .map_err(|e| classify(FailureStage::Internal, &ProviderError::new(e.to_string())))?;
    debug!(
        "Transaction assembled with {} instructions, mint {}",
        instructions.len(),
        mint_keypair.pubkey()
    );

    info!("Requesting wallet approval via {}", wallet.method);
    let signature = match wallet.method {
        SigningMethod::SignAndSend => wallet
            .provider
            .sign_and_send_transaction(transaction)
            .await
            .map_err(|e| classify(FailureStage::Submission, &e))?,
        SigningMethod::SignAll => {
            let signed = wallet
                .provider
                .sign_all_transactions(vec![transaction])
                .await
                .map_err(|e| classify(FailureStage::Signing, &e))?
                .into_iter()
                .next()
                .ok_or_else(|| incomplete_signature("wallet returned no transactions"))?;
            broadcast(rpc, &signed).await?
        }
        SigningMethod::Sign => {
            let signed = wallet
                .provider
                .sign_transaction(transaction)
                .await
                .map_err(|e| classify(FailureStage::Signing, &e))?;
            broadcast(rpc, &signed).await?
        }
    };

    info!("Transaction sent with signature: {}", signature);
    Ok(signature)
}

async fn broadcast(rpc: &dyn RpcConnection, transaction: &Transaction) -> TokenResult<Signature> {
    if !transaction.is_signed() {
        return Err(incomplete_signature(
            "wallet returned a transaction missing required signatures",
        ));
    }
    rpc.send_transaction(transaction)
        .await
        .map_err(|e| classify(FailureStage::Submission, &e))
}

fn incomplete_signature(reason: &str) -> TokenCreationError {
    TokenCreationError::new("Failed to sign transaction.", ErrorCode::WalletConnection)
        .with_detail("reason", reason)
}
