use crate::entity::{Quote, SwapError, SwapRequest, SwapResult, ValidationError};
use crate::solana::jupiter::{
    decode_swap_transaction, BuildSwapRequest, Config, QuoteParams, QuoteService, SwapService,
};
use crate::solana::utils::{from_smallest_unit, to_smallest_unit};
use crate::solana::WalletSession;
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use solana_sdk::signature::Signature;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Upper bounds on the steps that wait on the wallet or the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    pub sign_timeout: Duration,
    pub confirm_timeout: Duration,
    pub confirm_poll_interval: Duration,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            sign_timeout: Duration::from_secs(120),
            confirm_timeout: Duration::from_secs(60),
            confirm_poll_interval: Duration::from_secs(1),
        }
    }
}

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    async fn request_quote(&self, request: &SwapRequest) -> Result<Quote, SwapError>;

    async fn execute_swap(
        &self,
        request: &SwapRequest,
        wallet: &dyn WalletSession,
    ) -> Result<SwapResult, SwapError>;
}

pub struct SwapInteractorImpl {
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
    config: Config,
    limits: ExecutionLimits,
}

impl SwapInteractorImpl {
    pub fn new(
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapService>,
        config: Config,
        limits: ExecutionLimits,
    ) -> Self {
        Self {
            quote_service,
            swap_service,
            config,
            limits,
        }
    }

    async fn await_confirmation(
        &self,
        wallet: &dyn WalletSession,
        signature: &Signature,
    ) -> Result<(), SwapError> {
        match timeout(
            self.limits.confirm_timeout,
            poll_confirmation(wallet, signature, self.limits.confirm_poll_interval),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SwapError::Submit(e.to_string())),
            Err(_) => Err(SwapError::Submit(format!(
                "transaction {} not confirmed within {:?}",
                signature, self.limits.confirm_timeout
            ))),
        }
    }
}

async fn poll_confirmation(
    wallet: &dyn WalletSession,
    signature: &Signature,
    interval: Duration,
) -> Result<()> {
    loop {
        if wallet.confirm_transaction(signature).await? {
            return Ok(());
        }
        debug!("Transaction {} not confirmed yet", signature);
        sleep(interval).await;
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    async fn request_quote(&self, request: &SwapRequest) -> Result<Quote, SwapError> {
        let amount = request.amount()?.ok_or(ValidationError::EmptyAmount)?;

        let base = &self.config.base_token;
        let stable = &self.config.stable_token;
        let input = request.side.input_asset(base, stable);
        let output = request.side.output_asset(base, stable);

        let params = QuoteParams {
            input_mint: input.mint.clone(),
            output_mint: output.mint.clone(),
            amount: to_smallest_unit(amount, input.decimals)?,
            slippage_bps: request.slippage_bps,
        };

        let raw = self
            .quote_service
            .get_quote(&params)
            .await
            .map_err(|e| SwapError::Quote(e.to_string()))?;

        let out_amount = raw
            .out_amount_raw()
            .map_err(|e| SwapError::Quote(e.to_string()))?;

        Ok(Quote {
            output_amount: from_smallest_unit(out_amount, output.decimals),
            raw,
        })
    }

    async fn execute_swap(
        &self,
        request: &SwapRequest,
        wallet: &dyn WalletSession,
    ) -> Result<SwapResult, SwapError> {
        let user_public_key = wallet
            .public_key()
            .filter(|_| wallet.connected())
            .ok_or(ValidationError::WalletNotConnected)?;
        let amount_in = request.amount()?.ok_or(ValidationError::EmptyAmount)?;

        // Prices move between the preview and the confirmation, so quote again
        let quote = self.request_quote(request).await?;
        info!(
            "Fresh quote for {} {}: output_amount={}",
            request.side, amount_in, quote.output_amount
        );

        let swap_request = BuildSwapRequest {
            quote_response: quote.raw.clone(),
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: true,
        };

        let swap_response = self
            .swap_service
            .build_swap(&swap_request)
            .await
            .map_err(|e| SwapError::Build(e.to_string()))?;

        let transaction =
            decode_swap_transaction(&swap_response).map_err(|e| SwapError::Build(e.to_string()))?;

        let signed = timeout(self.limits.sign_timeout, wallet.sign_transaction(transaction))
            .await
            .map_err(|_| {
                warn!("Wallet did not sign within {:?}", self.limits.sign_timeout);
                SwapError::Sign(format!(
                    "wallet did not respond within {:?}",
                    self.limits.sign_timeout
                ))
            })?
            .map_err(|e| SwapError::Sign(e.to_string()))?;

        let signature = wallet
            .send_transaction(&signed)
            .await
            .map_err(|e| SwapError::Submit(e.to_string()))?;

        info!("Transaction sent: {}", signature);

        self.await_confirmation(wallet, &signature).await?;

        info!("Transaction confirmed: {}", signature);

        Ok(SwapResult {
            side: request.side,
            amount_in,
            amount_out: quote.output_amount,
            signature: signature.to_string(),
        })
    }
}
