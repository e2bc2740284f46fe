use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::solana::wallet::parse_pubkey;

/// Associated token account holding `mint` for `owner`
pub fn associated_token_address(owner: &Pubkey, mint: &str) -> Result<Pubkey> {
    let mint = parse_pubkey(mint)?;
    Ok(get_associated_token_address(owner, &mint))
}

/// Raw (base unit) balance of a token account
pub async fn get_token_account_balance(client: &RpcClient, account: &Pubkey) -> Result<u64> {
    let balance = client
        .get_token_account_balance(account)
        .await
        .map_err(|e| anyhow!("Failed to get token account balance: {}", e))?;

    balance
        .amount
        .parse::<u64>()
        .map_err(|e| anyhow!("Invalid token amount '{}': {}", balance.amount, e))
}
