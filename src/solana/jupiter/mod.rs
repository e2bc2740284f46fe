// src/solana/jupiter/mod.rs
pub mod config;
pub mod models;
pub mod quote_service;
pub mod swap_service;

pub use models::{BuildSwapRequest, QuoteParams, QuoteResponse, SwapResponse};

pub use config::Config;
pub use quote_service::{JupiterQuoteService, QuoteService};
pub use swap_service::{
    decode_swap_transaction, encode_swap_transaction, JupiterSwapService, SwapService,
};
