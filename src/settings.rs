use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::entity::{validate_slippage, MAX_SLIPPAGE_BPS};
use crate::interactor::ExecutionLimits;
use crate::presenter::ControllerSettings;

/// Runtime settings: defaults, then an optional `swap.toml`, then `SWAP_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub rpc_url: String,
    /// Base58 keypair for the local wallet
    pub keypair: Option<String>,
    pub debounce_ms: u64,
    pub default_slippage_bps: u16,
    pub sign_timeout_secs: u64,
    pub confirm_timeout_secs: u64,
    pub confirm_poll_ms: u64,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_sources(
            Self::defaults()?
                .add_source(File::with_name("swap").required(false))
                .add_source(Environment::with_prefix("SWAP").try_parsing(true)),
        )
    }

    fn from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Self = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values the controller cannot start from.
    pub fn validate(&self) -> Result<()> {
        validate_slippage(i64::from(self.default_slippage_bps)).with_context(|| {
            format!(
                "default_slippage_bps must be between 1 and {}, got {}",
                MAX_SLIPPAGE_BPS, self.default_slippage_bps
            )
        })?;
        Ok(())
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("rpc_url", "https://api.mainnet-beta.solana.com")?
            .set_default("debounce_ms", 500)?
            .set_default("default_slippage_bps", 100)?
            .set_default("sign_timeout_secs", 120)?
            .set_default("confirm_timeout_secs", 60)?
            .set_default("confirm_poll_ms", 1000)?)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            default_slippage_bps: self.default_slippage_bps,
        }
    }

    pub fn execution_limits(&self) -> ExecutionLimits {
        ExecutionLimits {
            sign_timeout: Duration::from_secs(self.sign_timeout_secs),
            confirm_timeout: Duration::from_secs(self.confirm_timeout_secs),
            confirm_poll_interval: Duration::from_millis(self.confirm_poll_ms),
        }
    }
}
