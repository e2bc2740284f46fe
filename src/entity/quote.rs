use rust_decimal::Decimal;

use crate::solana::jupiter::QuoteResponse;

/// A priced estimate for one `SwapRequest`. Never cached or reused.
#[derive(Debug, Clone)]
pub struct Quote {
    pub output_amount: Decimal,
    pub raw: QuoteResponse,
}
