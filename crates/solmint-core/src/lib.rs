//! # SOLMINT token creation core
//!
//! Assembles, signs, submits and confirms the transaction that creates a new SPL token,
//! and maps every way that can go wrong onto one closed error taxonomy.
//!
//! ## Pipeline
//!
//! 1. **Validation**: [`validate_token_config`] reports every violation at once; a failing
//!    config never reaches the network.
//! 2. **Fee pre-flight**: [`estimate_token_creation_fees`] against the payer balance.
//! 3. **Build**: [`build_mint_transaction`] emits create-account, initialize-mint,
//!    associated token account and (for a positive supply) mint-to, in that order.
//! 4. **Sign and submit**: [`submit_transaction`] partially signs with the fresh mint
//!    keypair and hands the rest to the injected [`WalletProvider`].
//! 5. **Confirm**: [`confirm_with_retry`] polls at most five times, two seconds apart.
//!
//! Every exit goes through the [`classifier`], so callers only ever see a
//! [`TokenCreationError`] with an [`ErrorCode`].
//!
//! ## Collaborators
//!
//! The wallet, the RPC node and the analytics sink are traits ([`WalletProvider`],
//! [`RpcConnection`], [`AnalyticsSink`]). Nothing in this crate reaches for ambient state.

pub mod analytics;
pub mod audit;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod confirm;
pub mod creator;
pub mod error;
pub mod explorer;
pub mod fees;
pub mod rpc;
pub mod submit;
pub mod validator;
pub mod wallet;

pub use analytics::{AnalyticsEvent, AnalyticsEventType, AnalyticsSink, InMemoryAnalytics};
pub use audit::{generate_security_report, validate_token_security, RiskLevel, SecurityIssue, SecurityReport};
pub use builder::{build_mint_transaction, AuthorityMode, MintTransactionPlan};
pub use config::{CreationResult, Network, TokenConfig, TokenMetadata};
pub use confirm::{confirm_with_retry, ConfirmationOutcome, ConfirmationPolicy, ConfirmationState};
pub use creator::{create_solana_token, TokenCreator};
pub use error::{ErrorCode, ErrorDetails, ProviderError, TokenCreationError, TokenResult};
pub use explorer::{check_token_exists, token_explorer_url, transaction_explorer_url};
pub use fees::estimate_token_creation_fees;
pub use rpc::{RpcConnection, SignatureStatus, SolanaRpc};
pub use submit::submit_transaction;
pub use validator::{validate_mint_parameters, validate_token_config, ValidationResult};
pub use wallet::{KeypairWallet, SigningMethod, Wallet, WalletProvider};
