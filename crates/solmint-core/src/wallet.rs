use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::fmt;

use crate::classifier::{no_wallet, wallet_connection};
use crate::error::{ProviderError, TokenResult};

/// Ways a wallet can authorize a transaction, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SigningMethod {
    /// Sign and broadcast in one prompt.
    SignAndSend,
    SignAll,
    Sign,
}

impl SigningMethod {
    /// Pick the method to use from what a wallet supports.
    pub fn preferred(supported: &[SigningMethod]) -> Option<SigningMethod> {
        supported.iter().copied().min()
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SigningMethod::SignAndSend => "signAndSendTransaction",
            SigningMethod::SignAll => "signAllTransactions",
            SigningMethod::Sign => "signTransaction",
        };
        f.write_str(name)
    }
}

/// A connected wallet as injected by the caller.
///
/// Every call may suspend for as long as the user takes to answer the approval prompt.
/// Closing the prompt is reported as an error whose message contains "User rejected".
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `None` while the wallet is not connected.
    fn public_key(&self) -> Option<Pubkey>;

    fn signing_methods(&self) -> Vec<SigningMethod>;

    async fn sign_transaction(&self, _transaction: Transaction) -> Result<Transaction, ProviderError> {
        Err(ProviderError::new("signTransaction is not supported by this wallet"))
    }

    async fn sign_all_transactions(
        &self,
        _transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, ProviderError> {
        Err(ProviderError::new("signAllTransactions is not supported by this wallet"))
    }

    async fn sign_and_send_transaction(
        &self,
        _transaction: Transaction,
    ) -> Result<Signature, ProviderError> {
        Err(ProviderError::new("signAndSendTransaction is not supported by this wallet"))
    }
}

/// A wallet resolved once for one creation attempt: its key and the single signing
/// method that will be used.
pub struct Wallet<'a> {
    pub provider: &'a dyn WalletProvider,
    pub public_key: Pubkey,
    pub method: SigningMethod,
}

impl<'a> Wallet<'a> {
    pub fn resolve(provider: Option<&'a dyn WalletProvider>) -> TokenResult<Self> {
        let provider = provider.ok_or_else(no_wallet)?;
        let public_key = provider
            .public_key()
            .ok_or_else(|| wallet_connection("wallet has no public key"))?;
        let method = SigningMethod::preferred(&provider.signing_methods())
            .ok_or_else(|| wallet_connection("wallet exposes no signing method"))?;
        Ok(Self {
            provider,
            public_key,
            method,
        })
    }
}

/// Wallet backed by a local keypair, used by the command line and tests.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    fn sign(&self, mut transaction: Transaction) -> Result<Transaction, ProviderError> {
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| ProviderError::new(format!("keypair signing failed: {}", e)))?;
        Ok(transaction)
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    fn signing_methods(&self) -> Vec<SigningMethod> {
        vec![SigningMethod::Sign, SigningMethod::SignAll]
    }

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, ProviderError> {
        self.sign(transaction)
    }

    async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>, ProviderError> {
        transactions.into_iter().map(|tx| self.sign(tx)).collect()
    }
}
