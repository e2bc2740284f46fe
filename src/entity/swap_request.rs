use rust_decimal::Decimal;

use crate::entity::{SwapSide, ValidationError};
use crate::solana::utils::parse_amount;

/// Upper bound accepted by the aggregator for `slippageBps`.
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// User-entered swap parameters, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub side: SwapSide,
    pub input_amount: String,
    pub slippage_bps: u16,
}

impl SwapRequest {
    pub fn new(
        side: SwapSide,
        input_amount: &str,
        slippage_bps: u16,
    ) -> Result<Self, ValidationError> {
        let input_amount = input_amount.trim();
        if !input_amount.is_empty() {
            parse_amount(input_amount)?;
        }
        validate_slippage(i64::from(slippage_bps))?;

        Ok(Self {
            side,
            input_amount: input_amount.to_string(),
            slippage_bps,
        })
    }

    /// Parsed input amount, `None` when the field is empty.
    pub fn amount(&self) -> Result<Option<Decimal>, ValidationError> {
        if self.input_amount.is_empty() {
            return Ok(None);
        }
        parse_amount(&self.input_amount).map(Some)
    }
}

/// Checks a basis-point slippage value and narrows it to `u16`.
pub fn validate_slippage(bps: i64) -> Result<u16, ValidationError> {
    if bps <= 0 || bps > i64::from(MAX_SLIPPAGE_BPS) {
        return Err(ValidationError::InvalidSlippage);
    }
    Ok(bps as u16)
}
