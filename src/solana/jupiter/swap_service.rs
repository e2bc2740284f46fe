use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use log::{debug, info};
use reqwest::Client as HttpClient;
use solana_sdk::transaction::VersionedTransaction;

use crate::solana::jupiter::{BuildSwapRequest, Config, SwapResponse};

/// Interface for the swap-build service
#[async_trait]
pub trait SwapService: Send + Sync {
    /// Turns a quote into an unsigned transaction for `request.user_public_key`
    async fn build_swap(&self, request: &BuildSwapRequest) -> Result<SwapResponse>;
}

/// Service for building swap transactions using Jupiter
pub struct JupiterSwapService {
    http_client: HttpClient,
    config: Config,
}

impl JupiterSwapService {
    pub fn new(config: Config) -> Self {
        Self::with_client(HttpClient::new(), config)
    }

    pub fn with_client(http_client: HttpClient, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl SwapService for JupiterSwapService {
    async fn build_swap(&self, request: &BuildSwapRequest) -> Result<SwapResponse> {
        let url = self.config.endpoint("swap");

        debug!(
            "Requesting swap transaction with user_public_key: {}",
            request.user_public_key
        );

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Jupiter API error ({}): {}", status, error_text));
        }

        let swap_response = response
            .json::<SwapResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse swap response: {}", e))?;

        info!(
            "Swap transaction received: tx_length={}",
            swap_response.swap_transaction.len()
        );

        Ok(swap_response)
    }
}

/// Decodes the base64 transaction returned by the swap endpoint
pub fn decode_swap_transaction(swap_response: &SwapResponse) -> Result<VersionedTransaction> {
    let bytes = STANDARD
        .decode(swap_response.swap_transaction.trim())
        .map_err(|e| anyhow!("Failed to decode swap transaction: {}", e))?;

    bincode::deserialize(&bytes).map_err(|e| anyhow!("Failed to deserialize transaction: {}", e))
}

/// Inverse of [`decode_swap_transaction`]
pub fn encode_swap_transaction(transaction: &VersionedTransaction) -> Result<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| anyhow!("Failed to serialize transaction: {}", e))?;

    Ok(STANDARD.encode(bytes))
}
