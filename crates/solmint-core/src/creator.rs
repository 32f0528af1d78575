use log::{error, info, warn};
use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::builder::{build_mint_transaction, AuthorityMode};
use crate::classifier::{classify, insufficient_funds, invalid_config, FailureStage};
use crate::config::{CreationResult, Network, TokenConfig};
use crate::confirm::{confirm_with_retry, ConfirmationPolicy};
use crate::error::TokenResult;
use crate::fees::{estimate_token_creation_fees, mint_rent_exemption};
use crate::rpc::{RpcConnection, SolanaRpc};
use crate::submit::submit_transaction;
use crate::validator::{validate_mint_parameters, validate_token_config};
use crate::wallet::{Wallet, WalletProvider};

/// Handle that runs token creation attempts against one network.
///
/// Attempts take `&mut self`, so a handle can only have one attempt in flight. Separate
/// handles are independent; nothing is shared between attempts except the analytics sink.
pub struct TokenCreator {
    rpc: Arc<dyn RpcConnection>,
    network: Network,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    confirmation: ConfirmationPolicy,
    authority_mode: AuthorityMode,
}

impl TokenCreator {
    pub fn new(rpc: Arc<dyn RpcConnection>, network: Network) -> Self {
        Self {
            rpc,
            network,
            analytics: None,
            confirmation: ConfirmationPolicy::default(),
            authority_mode: AuthorityMode::default(),
        }
    }

    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    pub fn with_confirmation_policy(mut self, policy: ConfirmationPolicy) -> Self {
        self.confirmation = policy;
        self
    }

    pub fn with_authority_mode(mut self, mode: AuthorityMode) -> Self {
        self.authority_mode = mode;
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Validate `config` and create the token, reporting the outcome to analytics.
    pub async fn create_token(
        &mut self,
        config: &TokenConfig,
        wallet: Option<&dyn WalletProvider>,
    ) -> TokenResult<CreationResult> {
        self.track(AnalyticsEvent::token_creation_started(config, self.network));

        let validation = validate_token_config(config);
        let result = if validation.is_valid {
            self.run_stages(config, wallet).await
        } else {
            Err(invalid_config(&validation.errors))
        };

        match &result {
            Ok(created) => {
                info!("Token created with address: {}", created.token_address);
                self.track(AnalyticsEvent::token_creation_success(
                    config,
                    self.network,
                    &created.token_address,
                    &created.signature,
                ));
            }
            Err(e) => {
                error!("Error creating token [{}]: {}", e.code, e.message);
                self.track(AnalyticsEvent::token_creation_error(config, self.network, e));
            }
        }
        result
    }

    /// Create the token without analytics, accepting a zero initial supply.
    ///
    /// Callers normally go through [`TokenCreator::create_token`]. Every other validation
    /// rule still applies before anything touches the network; a zero supply yields a mint
    /// without any minted tokens.
    pub async fn execute(
        &mut self,
        config: &TokenConfig,
        wallet: Option<&dyn WalletProvider>,
    ) -> TokenResult<CreationResult> {
        let validation = validate_mint_parameters(config);
        if !validation.is_valid {
            return Err(invalid_config(&validation.errors));
        }
        self.run_stages(config, wallet).await
    }

    /// Wallet resolution, balance pre-flight, build, sign/submit and confirmation.
    async fn run_stages(
        &mut self,
        config: &TokenConfig,
        wallet: Option<&dyn WalletProvider>,
    ) -> TokenResult<CreationResult> {
        let wallet = Wallet::resolve(wallet)?;
        let rpc = self.rpc.as_ref();

        // One keypair per attempt; the confirmation retry below reuses it.
        let mint_keypair = Keypair::new();
        info!("Generated mint keypair: {}", mint_keypair.pubkey());
        info!("Wallet public key: {}", wallet.public_key);

        let rent_lamports = mint_rent_exemption(rpc)
            .await
            .map_err(|e| classify(FailureStage::RpcQuery, &e))?;
        let balance = rpc
            .get_balance(&wallet.public_key)
            .await
            .map_err(|e| classify(FailureStage::RpcQuery, &e))?;
        let estimated_fees = estimate_token_creation_fees(rpc, config.decimals).await;
        info!(
            "Wallet balance: {} lamports, estimated fees: {} lamports",
            balance, estimated_fees
        );
        if balance < estimated_fees {
            return Err(insufficient_funds(estimated_fees, balance));
        }

        let plan = build_mint_transaction(
            config,
            &wallet.public_key,
            &mint_keypair.pubkey(),
            rent_lamports,
            self.authority_mode,
        )?;

        if self.network.is_production() {
            warn!("This is a mainnet transaction. Please confirm in your wallet.");
        }
        let signature = submit_transaction(rpc, &wallet, &plan.instructions, &mint_keypair).await?;

        let outcome = confirm_with_retry(rpc, &signature, &self.confirmation).await;
        outcome.into_result(&signature)?;
        info!("Transaction confirmed");

        Ok(CreationResult {
            token_address: plan.mint.to_string(),
            signature: signature.to_string(),
        })
    }

    fn track(&self, event: AnalyticsEvent) {
        if let Some(sink) = &self.analytics {
            sink.track_event(event);
        }
    }
}

/// Create a token on the public endpoint of `network`.
pub async fn create_solana_token(
    config: &TokenConfig,
    network: Network,
    wallet: Option<&dyn WalletProvider>,
) -> TokenResult<CreationResult> {
    let rpc: Arc<dyn RpcConnection> = Arc::new(SolanaRpc::for_network(network));
    TokenCreator::new(rpc, network)
        .create_token(config, wallet)
        .await
}
