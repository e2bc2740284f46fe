// src/solana/jupiter/models.rs
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Parameters of a quote request
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

impl QuoteParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
        ]
    }
}

// Quote payload. Only `outAmount` is interpreted, everything else is passed
// back to the swap endpoint untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub out_amount: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuoteResponse {
    /// `outAmount` in base units of the output asset
    pub fn out_amount_raw(&self) -> Result<u64> {
        self.out_amount
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("Invalid outAmount '{}': {}", self.out_amount, e))
    }
}

// Body of POST /swap
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSwapRequest {
    pub quote_response: QuoteResponse,
    pub user_public_key: String,
    pub wrap_and_unwrap_sol: bool,
}

// Response of POST /swap
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub swap_transaction: String,
    pub last_valid_block_height: Option<u64>,
}
