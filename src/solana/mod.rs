// Re-export everything from submodules
pub mod client;
pub mod jupiter;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::create_solana_client;
pub use utils::{format_amount, from_smallest_unit, parse_amount, to_smallest_unit};
pub use wallet::{keypair_from_base58, parse_pubkey, KeypairWallet, WalletSession};
