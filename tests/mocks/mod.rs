//! Shared mocks and fixtures for integration tests
//!
//! Mock quote providers with call and concurrency tracking, plus a fake CoW
//! order book API served over HTTP.

pub mod cow_server;
pub mod providers;

#[allow(unused_imports)]
pub use cow_server::CowApiServer;
#[allow(unused_imports)]
pub use providers::{CallTracker, MockProvider};

use alloy_primitives::{address, Address, U256};
use swap_router::models::{Chain, QuoteRequest};
use swap_router::SwapRouterBuilder;

#[allow(dead_code)]
pub const BASE_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
#[allow(dead_code)]
pub const BASE_WETH: Address = address!("4200000000000000000000000000000000000006");
#[allow(dead_code)]
pub const USER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// 1 USDC -> WETH on Base at 0.5% slippage
#[allow(dead_code)]
pub fn usdc_to_weth_request() -> QuoteRequest {
	QuoteRequest::new(Chain::Base, BASE_USDC, BASE_WETH, U256::from(1_000_000u64), USER)
		.with_slippage(0.5)
}

/// Builder with built-in providers disabled so only mocks are registered
#[allow(dead_code)]
pub fn mock_builder() -> SwapRouterBuilder {
	let mut settings = swap_router::Settings::default();
	settings.providers.cowswap.enabled = false;
	SwapRouterBuilder::from_settings(settings).expect("default settings are valid")
}
