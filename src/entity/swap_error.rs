/// Reasons a swap attempt is refused before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount is empty")]
    EmptyAmount,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Slippage must be between 0.01% and 100%")]
    InvalidSlippage,

    #[error("Insufficient funds")]
    InsufficientBalance,

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("A swap is already being submitted")]
    SwapInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("Quote failed: {0}")]
    Quote(String),

    #[error("Failed to build swap transaction: {0}")]
    Build(String),

    #[error("Failed to sign transaction: {0}")]
    Sign(String),

    #[error("Failed to submit transaction: {0}")]
    Submit(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
