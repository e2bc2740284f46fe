use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;

use crate::entity::{SwapOutcome, SwapSide, UiState};
use crate::solana::jupiter::Config;
use crate::solana::utils::{format_balance, parse_amount};
use crate::solana::WalletSession;

pub trait SwapView: Send + Sync {
    fn render(&self, state: &UiState, wallet_connected: bool) -> String;
}

/// Plain-text rendering of the widget for a terminal.
pub struct TerminalSwapView {
    config: Config,
}

impl TerminalSwapView {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn action_label(&self, side: SwapSide) -> String {
        let base = &self.config.base_token.symbol;
        let stable = &self.config.stable_token.symbol;
        match side {
            SwapSide::Buy => format!("Buy {} with {}", stable, base),
            SwapSide::Sell => format!("Sell {} for {}", stable, base),
        }
    }
}

/// Mirrors the enabled state of the swap button.
pub fn can_submit(state: &UiState, wallet_connected: bool) -> bool {
    if !wallet_connected || state.input_amount.is_empty() || state.phase.is_submitting() {
        return false;
    }

    parse_amount(&state.input_amount)
        .map(|amount| amount <= state.input_balance())
        .unwrap_or(false)
}

impl SwapView for TerminalSwapView {
    fn render(&self, state: &UiState, wallet_connected: bool) -> String {
        let input = state
            .side
            .input_asset(&self.config.base_token, &self.config.stable_token);
        let output = state
            .side
            .output_asset(&self.config.base_token, &self.config.stable_token);

        let mut lines = vec![
            format!(
                "Wallet: {}",
                if wallet_connected { "connected" } else { "not connected" }
            ),
            format!("{} Amount: {}", input.symbol, state.input_amount),
            format!(
                "Balance: {} {}",
                format_balance(state.input_balance()),
                input.symbol
            ),
            format!(
                "Slippage %: {}",
                Decimal::new(i64::from(state.slippage_bps), 2)
            ),
        ];

        if state.is_fetching {
            lines.push("Loading quote...".to_string());
        }
        if !state.output_amount.is_empty() {
            lines.push(format!("Output: {} {}", state.output_amount, output.symbol));
        }
        if !state.error.is_empty() {
            lines.push(format!("Error: {}", state.error));
        }
        if let Some(SwapOutcome::Success(result)) = &state.last_outcome {
            lines.push(format!("Swap successful! {}", result.signature));
        }

        let enabled = if can_submit(state, wallet_connected) {
            "enabled"
        } else {
            "disabled"
        };
        lines.push(format!("[{}] ({})", self.action_label(state.side), enabled));

        lines.join("\n")
    }
}

/// Re-renders on every store change until the store is dropped.
pub async fn render_changes<V: SwapView>(
    view: &V,
    mut updates: watch::Receiver<UiState>,
    wallet: Arc<dyn WalletSession>,
) {
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        println!("\n{}", view.render(&state, wallet.connected()));
    }
}
