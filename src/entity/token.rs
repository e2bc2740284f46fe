use serde::{Deserialize, Serialize};

/// A tradable asset as the widget sees it: an opaque mint plus its precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub symbol: String,  // Display symbol (e.g. "SOL", "USDC")
    pub mint: String,    // Mint address
    pub decimals: u32,   // Number of decimal places
}

impl Asset {
    pub fn new(symbol: &str, mint: &str, decimals: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            mint: mint.to_string(),
            decimals,
        }
    }
}
