use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::solana::jupiter::{Config, QuoteParams, QuoteResponse};

/// Interface for the pricing service
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Price `params.amount` of the input mint in units of the output mint
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse>;
}

/// Implementation of the quote service using Jupiter API
pub struct JupiterQuoteService {
    http_client: Client,
    config: Config,
}

impl JupiterQuoteService {
    /// Creates a new instance of quote service
    pub fn new(config: Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse> {
        let url = self.config.endpoint("quote");

        debug!("Requesting quote from {} with parameters: {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .query(&params.to_query())
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

        let quote = response
            .json::<QuoteResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse quote response: {}", e))?;

        // Reject quotes we could not display before they reach the caller
        quote.out_amount_raw()?;

        info!(
            "Quote received successfully: input_amount={}, output_amount={}",
            params.amount, quote.out_amount
        );

        Ok(quote)
    }
}
