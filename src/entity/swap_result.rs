use rust_decimal::Decimal;

use crate::entity::SwapSide;

/// A confirmed swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub side: SwapSide,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub signature: String,
}

/// What the user saw at the end of the last swap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Success(SwapResult),
    Failure(String),
}
