// Re-export submodules
pub mod constants;
pub mod native;
pub mod spl;
pub mod transaction;

// Re-export commonly used items
pub use constants::{SOL_DECIMALS, SOL_MINT, USDC_DECIMALS, USDC_MINT};
pub use native::get_sol_balance;
pub use spl::{associated_token_address, get_token_account_balance};
pub use transaction::{is_confirmed, send_versioned_transaction, sign_versioned_transaction};
