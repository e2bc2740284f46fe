use crate::entity::Asset;
use crate::solana::tokens::constants::{SOL_DECIMALS, SOL_MINT, USDC_DECIMALS, USDC_MINT};

const DEFAULT_QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6";

/// Aggregator endpoint and the asset pair the widget trades
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for the quote and swap API
    pub quote_api_url: String,

    /// Chain-native asset (wrapped SOL)
    pub base_token: Asset,

    /// Stable asset (USDC)
    pub stable_token: Asset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
            base_token: Asset::new("SOL", SOL_MINT, SOL_DECIMALS),
            stable_token: Asset::new("USDC", USDC_MINT, USDC_DECIMALS),
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables, falling back to mainnet defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        Self {
            quote_api_url: env::var("QUOTE_API_URL").unwrap_or(defaults.quote_api_url),
            base_token: Asset {
                mint: env::var("BASE_TOKEN_ADDRESS").unwrap_or(defaults.base_token.mint),
                ..defaults.base_token
            },
            stable_token: Asset {
                mint: env::var("STABLE_TOKEN_ADDRESS").unwrap_or(defaults.stable_token.mint),
                ..defaults.stable_token
            },
        }
    }

    /// Same pair against a different API host
    pub fn with_api_url(url: &str) -> Self {
        Self {
            quote_api_url: url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.quote_api_url.trim_end_matches('/'), path)
    }
}
