use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::solana::tokens;

/// Capabilities the widget borrows from a connected wallet.
///
/// The session is owned by the caller and handed to the controller
/// explicitly; the controller never creates keys or signatures itself.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Public key of the connected account, `None` while disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    fn connected(&self) -> bool;

    /// May wait on the user approving the request.
    async fn sign_transaction(&self, transaction: VersionedTransaction)
        -> Result<VersionedTransaction>;

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature>;

    /// One status check; `false` means not confirmed yet. A transaction that
    /// was processed with an error is reported as `Err`.
    async fn confirm_transaction(&self, signature: &Signature) -> Result<bool>;

    /// Native balance in lamports.
    async fn get_balance(&self, owner: &Pubkey) -> Result<u64>;

    /// Token account balance in base units.
    async fn get_token_account_balance(&self, account: &Pubkey) -> Result<u64>;
}

/// Wallet backed by a local keypair and an RPC connection.
pub struct KeypairWallet {
    keypair: Keypair,
    client: Arc<RpcClient>,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, client: Arc<RpcClient>) -> Self {
        Self {
            keypair,
            client,
            connected: AtomicBool::new(true),
        }
    }

    pub fn from_base58(keypair_base58: &str, client: Arc<RpcClient>) -> Result<Self> {
        Ok(Self::new(keypair_from_base58(keypair_base58)?, client))
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected() {
            Ok(())
        } else {
            Err(anyhow!("Wallet not connected"))
        }
    }
}

#[async_trait]
impl WalletSession for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.connected().then(|| self.keypair.pubkey())
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction> {
        self.ensure_connected()?;
        tokens::sign_versioned_transaction(transaction, &self.keypair)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        self.ensure_connected()?;
        tokens::send_versioned_transaction(&self.client, transaction).await
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<bool> {
        tokens::is_confirmed(&self.client, signature).await
    }

    async fn get_balance(&self, owner: &Pubkey) -> Result<u64> {
        tokens::get_sol_balance(&self.client, owner).await
    }

    async fn get_token_account_balance(&self, account: &Pubkey) -> Result<u64> {
        tokens::get_token_account_balance(&self.client, account).await
    }
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    let keypair = Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))?;

    Ok(keypair)
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|e| anyhow!("Invalid Solana address: {}", e))
}
