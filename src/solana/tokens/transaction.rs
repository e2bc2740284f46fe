use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    signature::{Keypair, Signature},
    transaction::VersionedTransaction,
};

/// Re-sign a transaction received from the aggregator with the local keypair
pub fn sign_versioned_transaction(
    transaction: VersionedTransaction,
    keypair: &Keypair,
) -> Result<VersionedTransaction> {
    VersionedTransaction::try_new(transaction.message, &[keypair])
        .map_err(|e| anyhow!("Failed to sign transaction: {}", e))
}

/// Broadcast a signed transaction without waiting for confirmation
pub async fn send_versioned_transaction(
    client: &RpcClient,
    transaction: &VersionedTransaction,
) -> Result<Signature> {
    client
        .send_transaction(transaction)
        .await
        .map_err(|e| anyhow!("Failed to send transaction: {}", e))
}

/// Single status check at the client's commitment. `Ok(false)` while the
/// transaction is unknown; a transaction that landed but failed is an error.
pub async fn is_confirmed(client: &RpcClient, signature: &Signature) -> Result<bool> {
    let status = client
        .get_signature_status_with_commitment(signature, client.commitment())
        .await
        .map_err(|e| anyhow!("Failed to confirm transaction: {}", e))?;

    match status {
        Some(Ok(())) => Ok(true),
        Some(Err(e)) => Err(anyhow!("Transaction {} failed: {}", signature, e)),
        None => Ok(false),
    }
}
