// Known token information
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

// Define token decimals
pub const SOL_DECIMALS: u32 = 9;
pub const USDC_DECIMALS: u32 = 6;
