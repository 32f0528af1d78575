//! Mapping from raw provider/network failures to [`ErrorCode`].
//!
//! Wallet providers and RPC nodes only report free-form messages, so classification is
//! substring matching. All of the matching rules live in [`RULES`]; add new provider
//! phrasings there.

use solana_sdk::transaction::TransactionError;
use solmint_common::constants::USER_REJECTED_MARKER;

use crate::error::{ErrorCode, ProviderError, TokenCreationError};

/// Where in the pipeline a failure surfaced. Decides the fallback code for
/// messages no rule recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Wallet `sign_transaction` / `sign_all_transactions`.
    Signing,
    /// Broadcast, either through the wallet or through RPC.
    Submission,
    /// Balance, rent and blockhash queries.
    RpcQuery,
    /// Local failures (instruction encoding, signing with the mint keypair).
    Internal,
}

struct Rule {
    needles: &'static [&'static str],
    code: ErrorCode,
    message: &'static str,
}

// Order matters: a rejected prompt that also mentions a timeout is still a rejection.
const RULES: &[Rule] = &[
    Rule {
        needles: &[USER_REJECTED_MARKER],
        code: ErrorCode::UserRejected,
        message: "Transaction was rejected by the user.",
    },
    Rule {
        needles: &["rate limit", "too many requests", "429"],
        code: ErrorCode::RateLimitExceeded,
        message: "Rate limit exceeded. Please try again later.",
    },
    Rule {
        needles: &["timeout", "timed out"],
        code: ErrorCode::NetworkError,
        message: "Transaction timed out. The network may be congested.",
    },
    Rule {
        needles: &["failed to fetch", "connection refused", "error sending request", "dns error"],
        code: ErrorCode::NetworkError,
        message: "Network error. Please check your internet connection and try again.",
    },
];

/// Classify a provider failure raised at `stage`.
///
/// Unrecognised messages never disappear: they fall back to a stage-specific code and keep
/// the original text under `details.original_error`.
pub fn classify(stage: FailureStage, error: &ProviderError) -> TokenCreationError {
    let haystack = error.message.to_lowercase();
    if let Some(rule) = RULES.iter().find(|rule| {
        rule.needles
            .iter()
            .any(|needle| haystack.contains(&needle.to_lowercase()))
    }) {
        return TokenCreationError::new(rule.message, rule.code)
            .with_detail("original_error", error.message.clone());
    }

    let (message, code) = match stage {
        FailureStage::Signing => ("Failed to sign transaction.", ErrorCode::WalletConnection),
        FailureStage::Submission => (
            "Failed to send transaction. Please try again later.",
            ErrorCode::TransactionFailed,
        ),
        FailureStage::RpcQuery => (
            "An unexpected error occurred while contacting the network.",
            ErrorCode::UnknownError,
        ),
        FailureStage::Internal => (
            "An unexpected error occurred during token creation.",
            ErrorCode::UnknownError,
        ),
    };
    TokenCreationError::new(message, code).with_detail("original_error", error.message.clone())
}

pub fn invalid_config(errors: &[String]) -> TokenCreationError {
    TokenCreationError::new(
        format!("Invalid token configuration: {}", errors.join(", ")),
        ErrorCode::InvalidTokenConfig,
    )
    .with_detail("errors", errors.to_vec())
}

pub fn no_wallet() -> TokenCreationError {
    TokenCreationError::new(
        "No wallet provider found. Please install Phantom or Solflare wallet extension.",
        ErrorCode::NoWallet,
    )
}

pub fn wallet_connection(reason: &str) -> TokenCreationError {
    TokenCreationError::new(
        "Wallet is not connected or cannot sign transactions.",
        ErrorCode::WalletConnection,
    )
    .with_detail("reason", reason)
}

pub fn insufficient_funds(required: u64, current: u64) -> TokenCreationError {
    use solmint_common::utils::math_utils::{lamports_to_sol, shortfall};

    TokenCreationError::new(
        format!(
            "Insufficient funds. You need at least {:.5} SOL to create a token.",
            lamports_to_sol(required)
        ),
        ErrorCode::InsufficientFunds,
    )
    .with_detail("required_balance", required)
    .with_detail("current_balance", current)
    .with_detail("shortfall", shortfall(required, current))
}

/// The transaction landed but failed on-chain. Deterministic, so never retried.
pub fn onchain_failure(signature: &str, err: &TransactionError) -> TokenCreationError {
    TokenCreationError::new(
        format!("Transaction failed: {}", err),
        ErrorCode::TransactionFailed,
    )
    .with_detail("confirmation_error", format!("{:?}", err))
    .with_detail("signature", signature)
}

pub fn confirmation_exhausted(signature: &str, attempts: u32) -> TokenCreationError {
    TokenCreationError::new(
        "Transaction confirmation failed after multiple attempts. Please check the explorer for the status.",
        ErrorCode::TransactionFailed,
    )
    .with_detail("signature", signature)
    .with_detail("attempts", attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn classify_msg(stage: FailureStage, msg: &str) -> TokenCreationError {
        classify(stage, &ProviderError::new(msg))
    }

    #[test]
    fn rejection_wins_at_every_stage() {
        for stage in [
            FailureStage::Signing,
            FailureStage::Submission,
            FailureStage::RpcQuery,
        ] {
            let err = classify_msg(stage, "User rejected the request.");
            assert_eq!(err.code, ErrorCode::UserRejected);
        }
    }

    #[test]
    fn timeouts_and_rate_limits_recognised() {
        assert_eq!(
            classify_msg(FailureStage::Submission, "operation timed out").code,
            ErrorCode::NetworkError
        );
        assert_eq!(
            classify_msg(FailureStage::Submission, "request timeout after 30s").code,
            ErrorCode::NetworkError
        );
        assert_eq!(
            classify_msg(FailureStage::RpcQuery, "HTTP status client error (429 Too Many Requests)").code,
            ErrorCode::RateLimitExceeded
        );
        assert_eq!(
            classify_msg(FailureStage::Submission, "rate limit reached").code,
            ErrorCode::RateLimitExceeded
        );
        assert_eq!(
            classify_msg(FailureStage::RpcQuery, "TypeError: Failed to fetch").code,
            ErrorCode::NetworkError
        );
    }

    #[test]
    fn fallback_depends_on_stage_and_keeps_original() {
        let signing = classify_msg(FailureStage::Signing, "ledger locked");
        assert_eq!(signing.code, ErrorCode::WalletConnection);
        assert_eq!(
            signing.detail("original_error"),
            Some(&Value::from("ledger locked"))
        );

        assert_eq!(
            classify_msg(FailureStage::Submission, "blockhash not found").code,
            ErrorCode::TransactionFailed
        );
        assert_eq!(
            classify_msg(FailureStage::RpcQuery, "invalid response").code,
            ErrorCode::UnknownError
        );
        assert_eq!(
            classify_msg(FailureStage::Internal, "bad instruction").code,
            ErrorCode::UnknownError
        );
    }

    #[test]
    fn insufficient_funds_reports_shortfall() {
        let err = insufficient_funds(3_500_000, 1_000_000);
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(err.detail("shortfall"), Some(&Value::from(2_500_000u64)));
        assert!(err.message.contains("0.00350 SOL"));
    }

    #[test]
    fn invalid_config_lists_every_error() {
        let err = invalid_config(&["a".to_string(), "b".to_string()]);
        assert_eq!(err.message, "Invalid token configuration: a, b");
        assert_eq!(err.detail("errors"), Some(&serde_json::json!(["a", "b"])));
    }
}
