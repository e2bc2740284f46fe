mod quote;
mod state;
mod swap_error;
mod swap_request;
mod swap_result;
mod swap_side;
mod token;
mod ui_state;

pub use quote::Quote;
pub use state::SwapPhase;
pub use swap_error::{SwapError, ValidationError};
pub use swap_request::{validate_slippage, SwapRequest, MAX_SLIPPAGE_BPS};
pub use swap_result::{SwapOutcome, SwapResult};
pub use swap_side::SwapSide;
pub use token::Asset;
pub use ui_state::{UiState, DEFAULT_SLIPPAGE_BPS};
