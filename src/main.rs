//! Spot swap widget - terminal front-end
//!
//! Renders the widget state on every change and feeds typed commands into the
//! swap controller. All trading logic lives in the library.
use anyhow::{anyhow, Context};
use dotenv::dotenv;
use log::{error, info};
use spot_swap_widget::solana::jupiter::Config as JupiterConfig;
use spot_swap_widget::solana::{create_solana_client, KeypairWallet, WalletSession};
use spot_swap_widget::{render_changes, ServiceContainer, Settings, SwapSide, TerminalSwapView};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: buy | sell | amount <x> | slippage <pct> | max | balance | swap | help | quit";

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting spot swap widget v{}", spot_swap_widget::VERSION);

    let settings = Settings::load()?;
    let jupiter_config = JupiterConfig::from_env();

    let keypair = settings
        .keypair
        .clone()
        .ok_or_else(|| anyhow!("SWAP_KEYPAIR must be set in environment variables"))?;

    info!("Connecting to Solana network at {}...", settings.rpc_url);
    let solana_client = create_solana_client(&settings.rpc_url);
    let wallet = Arc::new(
        KeypairWallet::from_base58(&keypair, solana_client.clone())
            .context("Failed to load wallet keypair")?,
    ) as Arc<dyn WalletSession>;

    let services = ServiceContainer::new(&settings, jupiter_config, solana_client, wallet);
    let controller = services.controller();

    let view = TerminalSwapView::new(services.jupiter_config().clone());
    let updates = controller.subscribe();
    let renderer_wallet = services.wallet();
    tokio::spawn(async move { render_changes(&view, updates, renderer_wallet).await });

    controller.refresh_balances().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let argument = parts.next().unwrap_or("");

        let outcome = match command {
            "" => Ok(()),
            "buy" => controller.set_side(SwapSide::Buy),
            "sell" => controller.set_side(SwapSide::Sell),
            "amount" => controller.set_input_amount(argument),
            "slippage" => controller.set_slippage_percent(argument).map(|_| ()),
            "max" => controller.fill_max(),
            "balance" => {
                controller.refresh_balances().await;
                Ok(())
            }
            "swap" => {
                // Runs in the background so a second "swap" hits the in-flight guard
                let controller = controller.clone();
                tokio::spawn(async move {
                    if let Err(e) = controller.execute_swap().await {
                        error!("Swap failed: {}", e);
                    }
                });
                Ok(())
            }
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command '{}'. {}", other, HELP);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("❌ {}", e);
        }
    }

    info!("Bye");
    Ok(())
}
