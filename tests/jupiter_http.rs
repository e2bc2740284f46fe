mod common;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use common::{unsigned_transaction, MockWallet, ONE_SOL};
use spot_swap_widget::entity::{SwapPhase, UiState};
use spot_swap_widget::interactor::{ExecutionLimits, SwapInteractorImpl};
use spot_swap_widget::presenter::{ControllerSettings, SwapController};
use spot_swap_widget::solana::jupiter::{
    decode_swap_transaction, encode_swap_transaction, BuildSwapRequest, Config,
    JupiterQuoteService, JupiterSwapService, QuoteParams, QuoteService, SwapService,
};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn aggregator() -> Router {
    Router::new()
        .route(
            "/quote",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "inAmount": query.get("amount"),
                    "outAmount": "5000000",
                    "echo": query,
                }))
            }),
        )
        .route(
            "/swap",
            post(|Json(body): Json<Value>| async move {
                if body["wrapAndUnwrapSol"] != json!(true)
                    || body["quoteResponse"]["outAmount"] != json!("5000000")
                    || !body["userPublicKey"].is_string()
                {
                    return Err((StatusCode::BAD_REQUEST, "bad swap request"));
                }
                let payload = encode_swap_transaction(&unsigned_transaction()).unwrap();
                Ok(Json(json!({
                    "swapTransaction": payload,
                    "lastValidBlockHeight": 42,
                })))
            }),
        )
}

fn failing_aggregator() -> Router {
    Router::new().route(
        "/quote",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    )
}

fn params() -> QuoteParams {
    let config = Config::default();
    QuoteParams {
        input_mint: config.base_token.mint,
        output_mint: config.stable_token.mint,
        amount: ONE_SOL,
        slippage_bps: 100,
    }
}

#[tokio::test]
async fn quote_request_carries_query_parameters() {
    let url = serve(aggregator()).await;
    let service = JupiterQuoteService::new(Config::with_api_url(&url));

    let quote = service.get_quote(&params()).await.unwrap();

    assert_eq!(quote.out_amount_raw().unwrap(), 5_000_000);
    let echo = &quote.extra["echo"];
    assert_eq!(echo["amount"], "1000000000");
    assert_eq!(echo["slippageBps"], "100");
    assert_eq!(echo["inputMint"], json!(params().input_mint));
    assert_eq!(echo["outputMint"], json!(params().output_mint));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let url = serve(failing_aggregator()).await;
    let service = JupiterQuoteService::new(Config::with_api_url(&url));

    let error = service.get_quote(&params()).await.unwrap_err().to_string();

    assert!(error.contains("500"));
    assert!(error.contains("upstream exploded"));
}

#[tokio::test]
async fn swap_build_posts_the_quote_back() {
    let url = serve(aggregator()).await;
    let config = Config::with_api_url(&url);
    let quote = JupiterQuoteService::new(config.clone())
        .get_quote(&params())
        .await
        .unwrap();

    let response = JupiterSwapService::new(config)
        .build_swap(&BuildSwapRequest {
            quote_response: quote,
            user_public_key: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".to_string(),
            wrap_and_unwrap_sol: true,
        })
        .await
        .unwrap();

    assert_eq!(response.last_valid_block_height, Some(42));
    assert_eq!(
        decode_swap_transaction(&response).unwrap(),
        unsigned_transaction()
    );
}

async fn wait_for<F>(controller: &SwapController, done: F) -> UiState
where
    F: Fn(&UiState) -> bool,
{
    let mut updates = controller.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = updates.borrow_and_update().clone();
            if done(&state) {
                return state;
            }
            updates.changed().await.unwrap();
        }
    })
    .await
    .expect("widget did not settle")
}

fn controller_against(url: &str) -> SwapController {
    let config = Config::with_api_url(url);
    let interactor = SwapInteractorImpl::new(
        Arc::new(JupiterQuoteService::new(config.clone())),
        Arc::new(JupiterSwapService::new(config.clone())),
        config.clone(),
        ExecutionLimits::default(),
    );

    SwapController::new(
        Arc::new(interactor),
        Arc::new(MockWallet::new(ONE_SOL, None)),
        config,
        ControllerSettings {
            debounce: Duration::from_millis(10),
            ..ControllerSettings::default()
        },
    )
}

#[tokio::test]
async fn widget_displays_quote_from_the_aggregator() {
    let url = serve(aggregator()).await;
    let controller = controller_against(&url);

    controller.set_input_amount("1").unwrap();
    let state = wait_for(&controller, |state| state.phase == SwapPhase::Quoted).await;

    assert_eq!(state.output_amount, "5.000000");
}

#[tokio::test]
async fn server_error_leaves_widget_idle_with_message() {
    let url = serve(failing_aggregator()).await;
    let controller = controller_against(&url);

    controller.set_input_amount("1").unwrap();
    let state = wait_for(&controller, |state| !state.error.is_empty()).await;

    assert_eq!(state.phase, SwapPhase::Idle);
    assert_eq!(state.output_amount, "");
    assert!(!state.is_fetching);
}
