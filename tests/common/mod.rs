#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::json;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spot_swap_widget::interactor::{ExecutionLimits, SwapInteractorImpl};
use spot_swap_widget::presenter::{ControllerSettings, SwapController};
use spot_swap_widget::solana::jupiter::{
    encode_swap_transaction, BuildSwapRequest, Config, QuoteParams, QuoteResponse, QuoteService,
    SwapResponse, SwapService,
};
use spot_swap_widget::solana::WalletSession;

pub const ONE_SOL: u64 = 1_000_000_000;

pub fn quote_response(out_amount: &str) -> QuoteResponse {
    serde_json::from_value(json!({
        "outAmount": out_amount,
        "routePlan": [],
        "priceImpactPct": "0"
    }))
    .unwrap()
}

pub fn unsigned_transaction() -> VersionedTransaction {
    VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(Message::default()),
    }
}

pub struct QuoteReply {
    pub delay: Duration,
    pub out_amount: Result<String, String>,
}

impl QuoteReply {
    pub fn ok(out_amount: &str) -> Self {
        Self::ok_after(out_amount, Duration::ZERO)
    }

    pub fn ok_after(out_amount: &str, delay: Duration) -> Self {
        Self {
            delay,
            out_amount: Ok(out_amount.to_string()),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            out_amount: Err(message.to_string()),
        }
    }
}

type Responder = Box<dyn Fn(&QuoteParams) -> QuoteReply + Send + Sync>;

pub struct MockQuoteService {
    respond: Responder,
    calls: Mutex<Vec<QuoteParams>>,
}

impl MockQuoteService {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&QuoteParams) -> QuoteReply + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(out_amount: &str) -> Self {
        let out_amount = out_amount.to_string();
        Self::new(move |_| QuoteReply::ok(&out_amount))
    }

    pub fn calls(&self) -> Vec<QuoteParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteService for MockQuoteService {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse> {
        self.calls.lock().unwrap().push(params.clone());
        let reply = (self.respond)(params);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply
            .out_amount
            .map(|out| quote_response(&out))
            .map_err(|e| anyhow!(e))
    }
}

pub struct MockSwapService {
    payload: Result<String, String>,
    requests: Mutex<Vec<BuildSwapRequest>>,
}

impl MockSwapService {
    pub fn new() -> Self {
        Self::with_payload(Ok(encode_swap_transaction(&unsigned_transaction()).unwrap()))
    }

    pub fn with_payload(payload: Result<String, String>) -> Self {
        Self {
            payload,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<BuildSwapRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapService for MockSwapService {
    async fn build_swap(&self, request: &BuildSwapRequest) -> Result<SwapResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.payload
            .clone()
            .map(|swap_transaction| SwapResponse {
                swap_transaction,
                last_valid_block_height: Some(1),
            })
            .map_err(|e| anyhow!(e))
    }
}

pub struct MockWallet {
    pubkey: Pubkey,
    connected: AtomicBool,
    lamports: u64,
    token_units: Option<u64>,
    sign_delay: Duration,
    reject_signing: bool,
    confirm_after: usize,
    fail_on_chain: bool,
    balance_delay: Duration,
    balance_calls: AtomicUsize,
    sign_calls: AtomicUsize,
    confirm_calls: AtomicUsize,
    sent: Mutex<Vec<VersionedTransaction>>,
}

impl MockWallet {
    pub fn new(lamports: u64, token_units: Option<u64>) -> Self {
        Self {
            pubkey: Pubkey::new_unique(),
            connected: AtomicBool::new(true),
            lamports,
            token_units,
            sign_delay: Duration::ZERO,
            reject_signing: false,
            confirm_after: 1,
            fail_on_chain: false,
            balance_delay: Duration::ZERO,
            balance_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            confirm_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn disconnected() -> Self {
        let wallet = Self::new(10 * ONE_SOL, Some(0));
        wallet.connected.store(false, Ordering::SeqCst);
        wallet
    }

    pub fn with_sign_delay(mut self, delay: Duration) -> Self {
        self.sign_delay = delay;
        self
    }

    pub fn rejecting_signatures(mut self) -> Self {
        self.reject_signing = true;
        self
    }

    pub fn confirming_after(mut self, polls: usize) -> Self {
        self.confirm_after = polls;
        self
    }

    pub fn failing_on_chain(mut self) -> Self {
        self.fail_on_chain = true;
        self
    }

    pub fn with_balance_delay(mut self, delay: Duration) -> Self {
        self.balance_delay = delay;
        self
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletSession for MockWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.connected().then_some(self.pubkey)
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if !self.sign_delay.is_zero() {
            tokio::time::sleep(self.sign_delay).await;
        }
        if self.reject_signing {
            return Err(anyhow!("User rejected the request"));
        }
        Ok(transaction)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(Signature::from([9u8; 64]))
    }

    async fn confirm_transaction(&self, _signature: &Signature) -> Result<bool> {
        let polls = self.confirm_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_chain {
            return Err(anyhow!(
                "Transaction failed: Error processing Instruction 3: custom program error: 0x1771"
            ));
        }
        Ok(polls >= self.confirm_after)
    }

    async fn get_balance(&self, _owner: &Pubkey) -> Result<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if !self.balance_delay.is_zero() {
            tokio::time::sleep(self.balance_delay).await;
        }
        Ok(self.lamports)
    }

    async fn get_token_account_balance(&self, _account: &Pubkey) -> Result<u64> {
        self.token_units
            .ok_or_else(|| anyhow!("could not find account"))
    }
}

pub struct Harness {
    pub quotes: Arc<MockQuoteService>,
    pub swaps: Arc<MockSwapService>,
    pub wallet: Arc<MockWallet>,
    pub controller: SwapController,
}

pub fn interactor(
    quotes: Arc<MockQuoteService>,
    swaps: Arc<MockSwapService>,
) -> SwapInteractorImpl {
    SwapInteractorImpl::new(quotes, swaps, Config::default(), ExecutionLimits::default())
}

pub fn harness(quotes: MockQuoteService, wallet: MockWallet) -> Harness {
    harness_with(quotes, MockSwapService::new(), wallet)
}

pub fn harness_with(quotes: MockQuoteService, swaps: MockSwapService, wallet: MockWallet) -> Harness {
    harness_configured(quotes, swaps, wallet, ControllerSettings::default())
}

pub fn harness_configured(
    quotes: MockQuoteService,
    swaps: MockSwapService,
    wallet: MockWallet,
    settings: ControllerSettings,
) -> Harness {
    let quotes = Arc::new(quotes);
    let swaps = Arc::new(swaps);
    let wallet = Arc::new(wallet);

    let controller = SwapController::new(
        Arc::new(interactor(quotes.clone(), swaps.clone())),
        wallet.clone(),
        Config::default(),
        settings,
    );

    Harness {
        quotes,
        swaps,
        wallet,
        controller,
    }
}
