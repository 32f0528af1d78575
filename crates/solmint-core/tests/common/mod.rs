#![allow(dead_code)]

use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use solmint_core::{ProviderError, RpcConnection, SignatureStatus, SigningMethod, WalletProvider};
use spl_token::instruction::TokenInstruction;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

pub const MINT_RENT: u64 = 1_461_600;
pub const TEN_SOL: u64 = 10_000_000_000;

/// In-process RPC node.
pub struct MockRpc {
    pub balance: u64,
    pub rent: Result<u64, String>,
    pub send_error: Option<String>,
    /// When set, account lookups fail with this message.
    pub account_error: Option<String>,
    /// Status answers in order; once drained every poll reports `Confirmed`.
    pub statuses: Mutex<VecDeque<Result<SignatureStatus, ProviderError>>>,
    pub accounts: Mutex<Vec<(Pubkey, Vec<u8>)>>,
    pub sent: Mutex<Vec<Transaction>>,
    pub calls: AtomicU32,
    pub status_calls: AtomicU32,
}

impl MockRpc {
    pub fn funded(balance: u64) -> Self {
        Self {
            balance,
            rent: Ok(MINT_RENT),
            send_error: None,
            account_error: None,
            statuses: Mutex::new(VecDeque::new()),
            accounts: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
        }
    }

    pub fn with_statuses(
        self,
        statuses: impl IntoIterator<Item = Result<SignatureStatus, ProviderError>>,
    ) -> Self {
        *self.statuses.lock().unwrap() = statuses.into_iter().collect();
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RpcConnection for MockRpc {
    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, ProviderError> {
        self.touch();
        Ok(self.balance)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        _data_len: usize,
    ) -> Result<u64, ProviderError> {
        self.touch();
        self.rent.clone().map_err(ProviderError::new)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ProviderError> {
        self.touch();
        Ok(Hash::new_unique())
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, ProviderError> {
        self.touch();
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(SignatureStatus::Confirmed))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ProviderError> {
        self.touch();
        if let Some(message) = &self.send_error {
            return Err(ProviderError::new(message.clone()));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>, ProviderError> {
        self.touch();
        if let Some(message) = &self.account_error {
            return Err(ProviderError::new(message.clone()));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| key == pubkey)
            .map(|(_, data)| data.clone()))
    }
}

/// How a [`MockWallet`] answers an approved prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    Sign,
    /// Hand the transaction back without adding the wallet signature.
    ReturnUnsigned,
    /// Answer a batch request with no transactions.
    ReturnEmptyBatch,
}

/// Browser-style wallet double with a configurable capability set.
pub struct MockWallet {
    pub keypair: Keypair,
    pub methods: Vec<SigningMethod>,
    /// When set, every prompt fails with this message.
    pub failure: Option<String>,
    pub approval: Approval,
    pub prompts: Mutex<Vec<(SigningMethod, Transaction)>>,
}

impl MockWallet {
    pub fn new(methods: Vec<SigningMethod>) -> Self {
        Self {
            keypair: Keypair::new(),
            methods,
            failure: None,
            approval: Approval::Sign,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(methods: Vec<SigningMethod>, approval: Approval) -> Self {
        Self {
            approval,
            ..Self::new(methods)
        }
    }

    pub fn failing(methods: Vec<SigningMethod>, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(methods)
        }
    }

    fn approve(&self, method: SigningMethod, mut tx: Transaction) -> Result<Transaction, ProviderError> {
        if let Some(message) = &self.failure {
            return Err(ProviderError::new(message.clone()));
        }
        if self.approval != Approval::ReturnUnsigned {
            let blockhash = tx.message.recent_blockhash;
            tx.try_partial_sign(&[&self.keypair], blockhash)
                .map_err(|e| ProviderError::new(e.to_string()))?;
        }
        self.prompts.lock().unwrap().push((method, tx.clone()));
        Ok(tx)
    }

    pub fn last_transaction(&self) -> Transaction {
        self.prompts.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    fn signing_methods(&self) -> Vec<SigningMethod> {
        self.methods.clone()
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, ProviderError> {
        self.approve(SigningMethod::Sign, tx)
    }

    async fn sign_all_transactions(&self, txs: Vec<Transaction>) -> Result<Vec<Transaction>, ProviderError> {
        if self.approval == Approval::ReturnEmptyBatch {
            return Ok(Vec::new());
        }
        txs.into_iter()
            .map(|tx| self.approve(SigningMethod::SignAll, tx))
            .collect()
    }

    async fn sign_and_send_transaction(&self, tx: Transaction) -> Result<Signature, ProviderError> {
        let signed = self.approve(SigningMethod::SignAndSend, tx)?;
        Ok(signed.signatures[0])
    }
}

/// Decode every SPL Token instruction in a compiled transaction.
pub fn token_instructions(tx: &Transaction) -> Vec<TokenInstruction<'_>> {
    tx.message
        .instructions
        .iter()
        .filter(|ix| tx.message.account_keys[ix.program_id_index as usize] == spl_token::id())
        .map(|ix| TokenInstruction::unpack(&ix.data).unwrap())
        .collect()
}

pub fn mint_to_count(tx: &Transaction) -> usize {
    token_instructions(tx)
        .iter()
        .filter(|ix| matches!(ix, TokenInstruction::MintTo { .. }))
        .count()
}
