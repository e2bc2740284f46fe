use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

/// Get SOL balance in lamports
pub async fn get_sol_balance(client: &RpcClient, owner: &Pubkey) -> Result<u64> {
    client
        .get_balance(owner)
        .await
        .map_err(|e| anyhow!("Failed to get balance: {}", e))
}
