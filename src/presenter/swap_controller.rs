use anyhow::Result;
use log::{debug, error, info, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::entity::{
    validate_slippage, SwapError, SwapOutcome, SwapPhase, SwapRequest, SwapResult, SwapSide,
    UiState, ValidationError, DEFAULT_SLIPPAGE_BPS,
};
use crate::interactor::SwapInteractor;
use crate::solana::jupiter::Config;
use crate::solana::tokens::associated_token_address;
use crate::solana::utils::{format_amount, from_smallest_unit, parse_amount, DISPLAY_DECIMALS};
use crate::solana::WalletSession;
use crate::view::SwapStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Quiet period after the last parameter change before a quote is requested
    pub debounce: Duration,
    pub default_slippage_bps: u16,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            default_slippage_bps: DEFAULT_SLIPPAGE_BPS,
        }
    }
}

/// Drives the swap widget: turns parameter edits into debounced quotes and a
/// confirmation into a submitted transaction.
///
/// Setters spawn the debounce task and must be called from within a Tokio
/// runtime. Every scheduled quote is tagged with a generation number; a
/// response whose generation is no longer current never reaches the store.
#[derive(Clone)]
pub struct SwapController {
    inner: Arc<Inner>,
}

struct Inner {
    store: SwapStore,
    interactor: Arc<dyn SwapInteractor>,
    wallet: Arc<dyn WalletSession>,
    config: Config,
    settings: ControllerSettings,
    generation: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    submitting: AtomicBool,
}

/// Releases the single-flight flag even if the submitting future is dropped.
struct SubmitGuard<'a> {
    inner: &'a Inner,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.inner.store.update(|state| {
            if state.phase.is_submitting() {
                state.phase = SwapPhase::Idle;
                true
            } else {
                false
            }
        });
        self.inner.submitting.store(false, Ordering::SeqCst);
    }
}

impl SwapController {
    pub fn new(
        interactor: Arc<dyn SwapInteractor>,
        wallet: Arc<dyn WalletSession>,
        config: Config,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: SwapStore::new(UiState::with_slippage(settings.default_slippage_bps)),
                interactor,
                wallet,
                config,
                settings,
                generation: AtomicU64::new(0),
                pending: Mutex::new(None),
                submitting: AtomicBool::new(false),
            }),
        }
    }

    pub fn state(&self) -> UiState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.store.subscribe()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Switches direction and clears the displayed output.
    pub fn set_side(&self, side: SwapSide) -> Result<(), SwapError> {
        self.ensure_editable()?;
        if self.inner.store.snapshot().side == side {
            return Ok(());
        }

        let generation = self.invalidate_quotes();
        self.inner.store.modify(|state| {
            state.side = side;
            state.output_amount.clear();
        });
        self.schedule_quote(generation);
        Ok(())
    }

    /// Accepts an empty string or a non-negative decimal; anything else leaves
    /// the state untouched.
    pub fn set_input_amount(&self, amount: &str) -> Result<(), SwapError> {
        self.ensure_editable()?;
        let amount = amount.trim();
        if !amount.is_empty() {
            parse_amount(amount)?;
        }

        let generation = self.invalidate_quotes();
        self.inner.store.modify(|state| {
            state.input_amount = amount.to_string();
            if amount.is_empty() {
                state.output_amount.clear();
                state.error.clear();
            }
        });
        self.schedule_quote(generation);
        Ok(())
    }

    /// Slippage in basis points; non-positive values are rejected and the
    /// previous value is kept.
    pub fn set_slippage(&self, bps: i64) -> Result<(), SwapError> {
        self.ensure_editable()?;
        let bps = validate_slippage(bps).map_err(|e| {
            warn!("Rejected slippage of {} bps", bps);
            e
        })?;
        if self.inner.store.snapshot().slippage_bps == bps {
            return Ok(());
        }

        let generation = self.invalidate_quotes();
        self.inner.store.modify(|state| state.slippage_bps = bps);
        self.schedule_quote(generation);
        Ok(())
    }

    /// Slippage as typed into the percent field. Unparsable or non-positive
    /// input falls back to the current value. Returns the effective bps.
    pub fn set_slippage_percent(&self, percent: &str) -> Result<u16, SwapError> {
        let bps = percent
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|pct| pct.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|bps| bps.round().to_i64());

        match bps.map(|bps| self.set_slippage(bps)) {
            Some(Ok(())) => {}
            Some(Err(SwapError::Validation(ValidationError::SwapInProgress))) => {
                return Err(ValidationError::SwapInProgress.into());
            }
            _ => debug!("Keeping previous slippage, got '{}'", percent),
        }

        Ok(self.inner.store.snapshot().slippage_bps)
    }

    /// Fills the amount field with the whole input-asset balance.
    pub fn fill_max(&self) -> Result<(), SwapError> {
        let balance = self
            .inner
            .store
            .snapshot()
            .input_balance()
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::ToZero);
        self.set_input_amount(&format_amount(balance))
    }

    /// Reloads both balances from the wallet. A missing stable-asset account
    /// reads as zero.
    pub async fn refresh_balances(&self) {
        let wallet = &self.inner.wallet;
        let owner = match wallet.public_key().filter(|_| wallet.connected()) {
            Some(owner) => owner,
            None => {
                self.inner.store.update(|state| {
                    let changed = !state.base_balance.is_zero() || !state.stable_balance.is_zero();
                    state.base_balance = Decimal::ZERO;
                    state.stable_balance = Decimal::ZERO;
                    changed
                });
                return;
            }
        };

        let (base, stable) = futures::join!(
            wallet.get_balance(&owner),
            self.fetch_stable_balance(&owner)
        );

        let base = base.unwrap_or_else(|e| {
            warn!("Failed to load {} balance: {}", self.inner.config.base_token.symbol, e);
            0
        });
        let stable = stable.unwrap_or_else(|e| {
            debug!("No {} balance: {}", self.inner.config.stable_token.symbol, e);
            0
        });

        let base_decimals = self.inner.config.base_token.decimals;
        let stable_decimals = self.inner.config.stable_token.decimals;
        self.inner.store.modify(|state| {
            state.base_balance = from_smallest_unit(base, base_decimals);
            state.stable_balance = from_smallest_unit(stable, stable_decimals);
        });
    }

    async fn fetch_stable_balance(&self, owner: &Pubkey) -> Result<u64> {
        let account = associated_token_address(owner, &self.inner.config.stable_token.mint)?;
        self.inner.wallet.get_token_account_balance(&account).await
    }

    /// Quotes again, builds, signs, sends and confirms the swap. Only one call
    /// may be in flight; a concurrent call is refused without side effects.
    pub async fn execute_swap(&self) -> Result<SwapResult, SwapError> {
        if self
            .inner
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Swap already in progress, ignoring request");
            return Err(ValidationError::SwapInProgress.into());
        }
        let guard = SubmitGuard { inner: &self.inner };

        let state = self.inner.store.snapshot();
        let request = match self.validate_submission(&state) {
            Ok(request) => request,
            Err(e) => {
                warn!("Swap rejected: {}", e);
                self.inner.store.modify(|state| {
                    state.error = e.to_string();
                    state.phase = SwapPhase::Idle;
                });
                return Err(e.into());
            }
        };

        self.invalidate_quotes();
        self.inner.store.modify(|state| {
            state.phase = SwapPhase::Submitting;
            state.is_fetching = false;
            state.error.clear();
        });

        info!(
            "Submitting {} swap of {} (slippage {} bps)",
            request.side, request.input_amount, request.slippage_bps
        );

        let result = self
            .inner
            .interactor
            .execute_swap(&request, self.inner.wallet.as_ref())
            .await;

        match &result {
            Ok(swap) => {
                info!("Swap successful! {}", swap.signature);
                self.inner.store.modify(|state| {
                    state.phase = SwapPhase::Confirmed;
                    state.input_amount.clear();
                    state.output_amount.clear();
                    state.last_outcome = Some(SwapOutcome::Success(swap.clone()));
                });
            }
            Err(e) => {
                error!("Swap failed: {}", e);
                self.inner.store.modify(|state| {
                    state.phase = SwapPhase::Failed;
                    state.error = e.to_string();
                    state.last_outcome = Some(SwapOutcome::Failure(e.to_string()));
                });
            }
        }
        self.inner.store.modify(|state| state.phase = SwapPhase::Idle);
        drop(guard);

        if result.is_ok() {
            self.refresh_balances().await;
        }

        result
    }

    fn validate_submission(&self, state: &UiState) -> Result<SwapRequest, ValidationError> {
        let wallet = &self.inner.wallet;
        if !wallet.connected() || wallet.public_key().is_none() {
            return Err(ValidationError::WalletNotConnected);
        }
        if state.input_amount.is_empty() {
            return Err(ValidationError::EmptyAmount);
        }

        let amount = parse_amount(&state.input_amount)?;
        if amount.is_zero() {
            return Err(ValidationError::InvalidAmount);
        }
        if amount > state.input_balance() {
            return Err(ValidationError::InsufficientBalance);
        }

        SwapRequest::new(state.side, &state.input_amount, state.slippage_bps)
    }

    fn ensure_editable(&self) -> Result<(), ValidationError> {
        if self.inner.submitting.load(Ordering::SeqCst) {
            return Err(ValidationError::SwapInProgress);
        }
        Ok(())
    }

    /// Makes every outstanding quote stale and returns the new generation.
    fn invalidate_quotes(&self) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(handle) = self.pending().take() {
            handle.abort();
        }
        self.inner.store.update(|state| {
            let changed = state.is_fetching || state.phase == SwapPhase::Quoting;
            state.is_fetching = false;
            if state.phase == SwapPhase::Quoting {
                state.phase = SwapPhase::Idle;
            }
            changed
        });

        generation
    }

    fn schedule_quote(&self, generation: u64) {
        if self.inner.store.snapshot().input_amount.is_empty() {
            return;
        }

        let controller = self.clone();
        let handle = tokio::spawn(async move { controller.run_quote(generation).await });

        let mut pending = self.pending();
        if self.is_current(generation) {
            *pending = Some(handle);
        } else {
            handle.abort();
        }
    }

    async fn run_quote(&self, generation: u64) {
        sleep(self.inner.settings.debounce).await;

        let state = self.inner.store.snapshot();
        let request = match SwapRequest::new(state.side, &state.input_amount, state.slippage_bps) {
            Ok(request) if !request.input_amount.is_empty() => request,
            Ok(_) => return,
            Err(e) => {
                warn!("Cannot request a quote: {}", e);
                self.inner.store.update(|state| {
                    if !self.is_current(generation) {
                        return false;
                    }
                    state.output_amount.clear();
                    state.error = e.to_string();
                    state.phase = SwapPhase::Idle;
                    true
                });
                return;
            }
        };

        let started = self.inner.store.update(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_fetching = true;
            state.phase = SwapPhase::Quoting;
            true
        });
        if !started {
            return;
        }

        let result = self.inner.interactor.request_quote(&request).await;

        let applied = self.inner.store.update(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_fetching = false;
            match &result {
                Ok(quote) => {
                    state.output_amount = format_amount(quote.output_amount);
                    state.error.clear();
                    state.phase = SwapPhase::Quoted;
                }
                Err(e) => {
                    state.output_amount.clear();
                    state.error = e.to_string();
                    state.phase = SwapPhase::Idle;
                }
            }
            true
        });

        if !applied {
            debug!("Discarding stale quote for generation {}", generation);
        } else if let Err(e) = result {
            warn!("Quote request failed: {}", e);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
