use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Structured diagnostics attached to a [`TokenCreationError`].
pub type ErrorDetails = Map<String, Value>;

/// Closed set of failure codes consumed by the UI and the analytics sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoWallet,
    WalletConnection,
    InsufficientFunds,
    UserRejected,
    TransactionFailed,
    NetworkError,
    InvalidTokenConfig,
    RateLimitExceeded,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoWallet => "NO_WALLET",
            ErrorCode::WalletConnection => "WALLET_CONNECTION",
            ErrorCode::InsufficientFunds => "INSUFFICIENT_FUNDS",
            ErrorCode::UserRejected => "USER_REJECTED",
            ErrorCode::TransactionFailed => "TRANSACTION_FAILED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::InvalidTokenConfig => "INVALID_TOKEN_CONFIG",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a token creation attempt.
///
/// `message` is meant for direct display; `code` is for programmatic branching.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TokenCreationError {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl TokenCreationError {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            details: None,
        }
    }

    /// Attach one detail entry, creating the map on first use.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }
}

/// Raw failure reported by a wallet provider or an RPC node.
///
/// Providers only give us a message; the classifier decides what it means.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<solana_client::client_error::ClientError> for ProviderError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        ProviderError::new(err.to_string())
    }
}

pub type TokenResult<T> = Result<T, TokenCreationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_wire_names() {
        let json = serde_json::to_string(&ErrorCode::RateLimitExceeded).unwrap();
        assert_eq!(json, "\"RATE_LIMIT_EXCEEDED\"");
        assert_eq!(ErrorCode::InvalidTokenConfig.to_string(), "INVALID_TOKEN_CONFIG");
    }

    #[test]
    fn details_accumulate() {
        let err = TokenCreationError::new("Insufficient funds.", ErrorCode::InsufficientFunds)
            .with_detail("shortfall", 42u64)
            .with_detail("current_balance", 8u64);
        assert_eq!(err.detail("shortfall"), Some(&Value::from(42u64)));
        assert_eq!(err.details.as_ref().map(|d| d.len()), Some(2));
        assert_eq!(err.to_string(), "Insufficient funds.");
    }
}
