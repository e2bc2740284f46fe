use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;

use crate::interactor::{SwapInteractor, SwapInteractorImpl};
use crate::presenter::SwapController;
use crate::settings::Settings;
use crate::solana::jupiter::config::Config as JupiterConfig;
use crate::solana::jupiter::quote_service::{JupiterQuoteService, QuoteService};
use crate::solana::jupiter::swap_service::{JupiterSwapService, SwapService};
use crate::solana::WalletSession;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    solana_client: Arc<RpcClient>,
    wallet: Arc<dyn WalletSession>,

    // Jupiter services
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,

    interactor: Arc<dyn SwapInteractor>,
    controller: SwapController,

    // Configuration
    jupiter_config: JupiterConfig,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies
    pub fn new(
        settings: &Settings,
        jupiter_config: JupiterConfig,
        solana_client: Arc<RpcClient>,
        wallet: Arc<dyn WalletSession>,
    ) -> Self {
        // One HTTP client shared by both Jupiter endpoints
        let http_client = reqwest::Client::new();

        let quote_service = Arc::new(JupiterQuoteService::with_client(
            http_client.clone(),
            jupiter_config.clone(),
        )) as Arc<dyn QuoteService>;

        let swap_service = Arc::new(JupiterSwapService::with_client(
            http_client,
            jupiter_config.clone(),
        )) as Arc<dyn SwapService>;

        let interactor = Arc::new(SwapInteractorImpl::new(
            quote_service.clone(),
            swap_service.clone(),
            jupiter_config.clone(),
            settings.execution_limits(),
        )) as Arc<dyn SwapInteractor>;

        let controller = SwapController::new(
            interactor.clone(),
            wallet.clone(),
            jupiter_config.clone(),
            settings.controller_settings(),
        );

        Self {
            solana_client,
            wallet,
            quote_service,
            swap_service,
            interactor,
            controller,
            jupiter_config,
        }
    }

    pub fn solana_client(&self) -> Arc<RpcClient> {
        self.solana_client.clone()
    }

    pub fn wallet(&self) -> Arc<dyn WalletSession> {
        self.wallet.clone()
    }

    pub fn quote_service(&self) -> Arc<dyn QuoteService> {
        self.quote_service.clone()
    }

    pub fn swap_service(&self) -> Arc<dyn SwapService> {
        self.swap_service.clone()
    }

    pub fn interactor(&self) -> Arc<dyn SwapInteractor> {
        self.interactor.clone()
    }

    pub fn controller(&self) -> SwapController {
        self.controller.clone()
    }

    pub fn jupiter_config(&self) -> &JupiterConfig {
        &self.jupiter_config
    }
}
