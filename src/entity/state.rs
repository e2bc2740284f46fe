/// Phase of the current swap attempt.
///
/// `Submitting` ends in exactly one of `Confirmed` or `Failed`, after which the
/// controller resets to `Idle`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum SwapPhase {
    #[default]
    Idle,
    Quoting,
    Quoted,
    Submitting,
    Confirmed,
    Failed,
}

impl SwapPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SwapPhase::Submitting)
    }
}
