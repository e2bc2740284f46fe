use rust_decimal::Decimal;

use crate::entity::{SwapOutcome, SwapPhase, SwapSide};

pub const DEFAULT_SLIPPAGE_BPS: u16 = 100;

/// Everything the widget renders. Rebuilt from scratch for every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub side: SwapSide,
    pub input_amount: String,
    pub output_amount: String,
    pub slippage_bps: u16,
    pub is_fetching: bool,
    pub error: String,
    pub base_balance: Decimal,
    pub stable_balance: Decimal,
    pub phase: SwapPhase,
    pub last_outcome: Option<SwapOutcome>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            side: SwapSide::default(),
            input_amount: String::new(),
            output_amount: String::new(),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            is_fetching: false,
            error: String::new(),
            base_balance: Decimal::ZERO,
            stable_balance: Decimal::ZERO,
            phase: SwapPhase::default(),
            last_outcome: None,
        }
    }
}

impl UiState {
    pub fn with_slippage(slippage_bps: u16) -> Self {
        Self {
            slippage_bps,
            ..Self::default()
        }
    }

    /// Balance of the asset spent on the current side.
    pub fn input_balance(&self) -> Decimal {
        match self.side {
            SwapSide::Buy => self.base_balance,
            SwapSide::Sell => self.stable_balance,
        }
    }
}
