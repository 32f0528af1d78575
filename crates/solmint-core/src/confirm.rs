use log::{debug, warn};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::Signature,
    transaction::TransactionError,
};
use solmint_common::constants::{CONFIRMATION_MAX_ATTEMPTS, CONFIRMATION_RETRY_DELAY_MS};
use std::time::Duration;
use tokio::time::sleep;

use crate::classifier::{confirmation_exhausted, onchain_failure};
use crate::error::TokenResult;
use crate::rpc::{RpcConnection, SignatureStatus};

/// Bounded polling schedule for confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub commitment: CommitmentConfig,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: CONFIRMATION_MAX_ATTEMPTS,
            delay: Duration::from_millis(CONFIRMATION_RETRY_DELAY_MS),
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

/// Terminal state of the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    Confirmed,
    /// Landed with an on-chain error; polling stops at once.
    Failed(TransactionError),
    /// Every attempt used without seeing the transaction land.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationOutcome {
    pub state: ConfirmationState,
    pub attempts: u32,
}

impl ConfirmationOutcome {
    /// Collapse into the pipeline's error taxonomy.
    pub fn into_result(self, signature: &Signature) -> TokenResult<()> {
        match self.state {
            ConfirmationState::Confirmed => Ok(()),
            ConfirmationState::Failed(err) => Err(onchain_failure(&signature.to_string(), &err)),
            ConfirmationState::Exhausted => {
                Err(confirmation_exhausted(&signature.to_string(), self.attempts))
            }
        }
    }
}

/// Poll the status of `signature` until it lands or the attempts run out.
///
/// Each poll consumes one attempt whether it reports "not yet seen" or fails in transport.
/// Only polling is retried: the transaction and the mint keypair behind it are never
/// rebuilt here.
pub async fn confirm_with_retry(
    rpc: &dyn RpcConnection,
    signature: &Signature,
    policy: &ConfirmationPolicy,
) -> ConfirmationOutcome {
    let mut attempts = 0;
    while attempts < policy.max_attempts {
        attempts += 1;
        match rpc.get_signature_status(signature, policy.commitment).await {
            Ok(SignatureStatus::Confirmed) => {
                debug!("Transaction {} confirmed after {} attempt(s)", signature, attempts);
                return ConfirmationOutcome {
                    state: ConfirmationState::Confirmed,
                    attempts,
                };
            }
            Ok(SignatureStatus::Failed(err)) => {
                warn!("Transaction {} failed on-chain: {}", signature, err);
                return ConfirmationOutcome {
                    state: ConfirmationState::Failed(err),
                    attempts,
                };
            }
            Ok(SignatureStatus::Pending) => {
                debug!("Confirmation attempt {} for {}: not yet confirmed", attempts, signature);
            }
            Err(e) => {
                warn!("Confirmation attempt {} failed: {}", attempts, e);
            }
        }
        if attempts < policy.max_attempts {
            sleep(policy.delay).await;
        }
    }

    ConfirmationOutcome {
        state: ConfirmationState::Exhausted,
        attempts,
    }
}
