use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

use crate::config::Network;
use crate::error::ProviderError;

/// Status of a broadcast transaction as seen by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// The node does not know the signature at the requested commitment yet.
    Pending,
    /// Landed at the requested commitment without error.
    Confirmed,
    /// Landed, but the transaction itself failed.
    Failed(TransactionError),
}

/// The RPC operations the pipeline needs.
///
/// Kept narrow so tests can run the full pipeline against an in-process double.
#[async_trait]
pub trait RpcConnection: Send + Sync {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ProviderError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ProviderError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ProviderError>;

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, ProviderError>;

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ProviderError>;

    /// Raw account data, `None` when the account does not exist.
    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>, ProviderError>;
}

/// [`RpcConnection`] backed by the nonblocking Solana RPC client.
pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
        }
    }

    /// Connect to the public endpoint of `network`.
    pub fn for_network(network: Network) -> Self {
        Self::new(network.rpc_endpoint().to_string())
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl RpcConnection for SolanaRpc {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ProviderError> {
        Ok(self.client.get_balance(pubkey).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ProviderError> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ProviderError> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, ProviderError> {
        let status = self
            .client
            .get_signature_status_with_commitment(signature, commitment)
            .await?;
        Ok(match status {
            None => SignatureStatus::Pending,
            Some(Ok(())) => SignatureStatus::Confirmed,
            Some(Err(err)) => SignatureStatus::Failed(err),
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ProviderError> {
        Ok(self.client.send_transaction(transaction).await?)
    }

    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>, ProviderError> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, CommitmentConfig::confirmed())
            .await?;
        Ok(response.value.map(|account| account.data))
    }
}
