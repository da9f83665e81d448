//! Fake CoW Swap order book API for adapter tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const ORDER_UID: &str = "0xabc123";
pub const SETTLEMENT_TX: &str =
	"0x1111111111111111111111111111111111111111111111111111111111111111";

#[derive(Debug, Default)]
pub struct CowApiState {
	pub quote_calls: AtomicUsize,
	pub status_calls: AtomicUsize,
	pub no_liquidity: AtomicBool,
	pub order_status: Mutex<String>,
	pub last_order: Mutex<Option<Value>>,
}

/// Test server instance serving `/base/api/v1/*`
pub struct CowApiServer {
	pub base_url: String,
	pub state: Arc<CowApiState>,
	handle: JoinHandle<()>,
}

impl CowApiServer {
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		let state = Arc::new(CowApiState {
			order_status: Mutex::new("open".to_string()),
			..Default::default()
		});

		let app = Router::new()
			.route("/base/api/v1/quote", post(quote))
			.route("/base/api/v1/orders", post(create_order))
			.route("/base/api/v1/orders/{uid}", get(order))
			.route("/base/api/v1/trades", get(trades))
			.with_state(state.clone());

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self {
			base_url: format!("http://{}", addr),
			state,
			handle,
		})
	}

	pub fn set_order_status(&self, status: &str) {
		if let Ok(mut current) = self.state.order_status.lock() {
			*current = status.to_string();
		}
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}

impl Drop for CowApiServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn quote(State(state): State<Arc<CowApiState>>, Json(body): Json<Value>) -> Response {
	state.quote_calls.fetch_add(1, Ordering::SeqCst);

	if state.no_liquidity.load(Ordering::SeqCst) {
		return (
			StatusCode::BAD_REQUEST,
			Json(json!({ "errorType": "NoLiquidity", "description": "no route found" })),
		)
			.into_response();
	}

	Json(json!({
		"quote": {
			"sellToken": body["sellToken"],
			"buyToken": body["buyToken"],
			"receiver": body["receiver"],
			"sellAmount": "990000",
			"buyAmount": "500000000000000",
			"feeAmount": "10000",
			"validTo": 1_900_000_000u32,
			"partiallyFillable": false,
			"kind": "sell"
		},
		"expiration": "2099-01-01T00:00:00Z",
		"id": 42
	}))
	.into_response()
}

async fn create_order(State(state): State<Arc<CowApiState>>, Json(body): Json<Value>) -> Response {
	if let Ok(mut last) = state.last_order.lock() {
		*last = Some(body);
	}
	(StatusCode::CREATED, Json(json!(ORDER_UID))).into_response()
}

async fn order(State(state): State<Arc<CowApiState>>, Path(uid): Path<String>) -> Response {
	state.status_calls.fetch_add(1, Ordering::SeqCst);

	if uid != ORDER_UID {
		return (
			StatusCode::NOT_FOUND,
			Json(json!({ "errorType": "NotFound", "description": "order not found" })),
		)
			.into_response();
	}

	let status = state
		.order_status
		.lock()
		.map(|status| status.clone())
		.unwrap_or_else(|_| "open".to_string());
	let executed = if status == "fulfilled" { "990000" } else { "0" };

	Json(json!({
		"uid": uid,
		"status": status,
		"executedSellAmount": executed
	}))
	.into_response()
}

async fn trades(Query(params): Query<HashMap<String, String>>) -> Response {
	match params.get("orderUid") {
		Some(uid) if uid == ORDER_UID => Json(json!([{ "txHash": SETTLEMENT_TX }])).into_response(),
		_ => Json(json!([])).into_response(),
	}
}
