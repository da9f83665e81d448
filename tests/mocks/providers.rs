//! Mock quote providers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::U256;
use swap_router::async_trait::async_trait;
use swap_router::models::test_utils::QuoteBuilder;
use swap_router::models::{
	Chain, OrderSignature, OrderStatus, OrderStatusResponse, Provider, ProviderCapabilities,
	ProviderError, ProviderResult, Quote, QuoteProvider, QuoteRequest,
};

/// Counts calls and tracks how many are in flight at once
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
	calls: Arc<AtomicUsize>,
	in_flight: Arc<AtomicUsize>,
	peak: Arc<AtomicUsize>,
}

impl CallTracker {
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	#[allow(dead_code)]
	pub fn peak_concurrency(&self) -> usize {
		self.peak.load(Ordering::SeqCst)
	}

	fn enter(&self) -> InFlight {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.peak.fetch_max(now, Ordering::SeqCst);
		InFlight(self.in_flight.clone())
	}
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

#[derive(Debug, Clone, Copy)]
enum Behavior {
	Quote,
	NoRoute,
	Fail,
}

/// Provider that answers every request with a quote for the requested pair
#[derive(Debug)]
pub struct MockProvider {
	info: Provider,
	behavior: Behavior,
	output_amount: U256,
	gas: u64,
	delay: Duration,
	pub tracker: CallTracker,
	pub status_tracker: CallTracker,
	order_status: Mutex<OrderStatus>,
}

impl MockProvider {
	fn new(id: &str, behavior: Behavior, output_amount: U256) -> Self {
		Self {
			info: Provider::new(id, format!("Mock Provider {}", id), "1.0.0")
				.with_chains([Chain::Base, Chain::Ethereum, Chain::Arbitrum]),
			behavior,
			output_amount,
			gas: 150_000,
			delay: Duration::ZERO,
			tracker: CallTracker::default(),
			status_tracker: CallTracker::default(),
			order_status: Mutex::new(OrderStatus::Created),
		}
	}

	/// On-chain aggregator quoting `output_amount`
	pub fn on_chain(id: &str, output_amount: u128) -> Self {
		Self::new(id, Behavior::Quote, U256::from(output_amount))
	}

	/// Gasless off-chain-order provider quoting `output_amount`
	pub fn gasless(id: &str, output_amount: u128) -> Self {
		let mut provider = Self::new(id, Behavior::Quote, U256::from(output_amount));
		provider.info = provider.info.with_capabilities(ProviderCapabilities {
			gasless: true,
			off_chain_orders: true,
			intent_based: true,
		});
		provider.gas = 0;
		provider
	}

	/// On-chain provider settled by solvers
	#[allow(dead_code)]
	pub fn intent_based(id: &str, output_amount: u128) -> Self {
		let mut provider = Self::new(id, Behavior::Quote, U256::from(output_amount));
		provider.info = provider.info.with_capabilities(ProviderCapabilities {
			intent_based: true,
			..Default::default()
		});
		provider
	}

	#[allow(dead_code)]
	pub fn no_route(id: &str) -> Self {
		Self::new(id, Behavior::NoRoute, U256::ZERO)
	}

	#[allow(dead_code)]
	pub fn failing(id: &str) -> Self {
		Self::new(id, Behavior::Fail, U256::ZERO)
	}

	/// Respond only after `millis`
	pub fn delayed(mut self, millis: u64) -> Self {
		self.delay = Duration::from_millis(millis);
		self
	}

	#[allow(dead_code)]
	pub fn with_gas(mut self, gas: u64) -> Self {
		self.gas = gas;
		self
	}

	#[allow(dead_code)]
	pub fn on_chains(mut self, chains: &[Chain]) -> Self {
		self.info = self.info.with_chains(chains.iter().copied());
		self
	}

	/// Status reported for every order from now on
	#[allow(dead_code)]
	pub fn set_order_status(&self, status: OrderStatus) {
		if let Ok(mut current) = self.order_status.lock() {
			*current = status;
		}
	}

	pub fn call_count(&self) -> usize {
		self.tracker.call_count()
	}

	fn quote_for(&self, request: &QuoteRequest) -> Quote {
		let builder = QuoteBuilder::new(self.id())
			.chain(request.chain)
			.tokens(request.input_token, request.output_token)
			.input_amount(request.input_amount)
			.output_amount(self.output_amount);
		if self.capabilities().off_chain_orders {
			builder.off_chain().build()
		} else {
			builder.gas(self.gas).build()
		}
	}
}

#[async_trait]
impl QuoteProvider for MockProvider {
	fn provider_info(&self) -> &Provider {
		&self.info
	}

	async fn get_quote(&self, request: &QuoteRequest) -> ProviderResult<Option<Quote>> {
		let _guard = self.tracker.enter();
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}

		match self.behavior {
			Behavior::Quote => Ok(Some(self.quote_for(request))),
			Behavior::NoRoute => Ok(None),
			Behavior::Fail => Err(ProviderError::from_http_failure(503)),
		}
	}

	async fn create_order(
		&self,
		quote: &Quote,
		_signature: &OrderSignature,
	) -> ProviderResult<Option<String>> {
		if !self.capabilities().off_chain_orders {
			return Err(ProviderError::unsupported("create_order", self.id()));
		}
		Ok(Some(format!("{}-order-{}", self.id(), quote.output_amount)))
	}

	async fn get_order_status(
		&self,
		_chain: Chain,
		order_id: &str,
	) -> ProviderResult<Option<OrderStatusResponse>> {
		let _guard = self.status_tracker.enter();
		let status = self
			.order_status
			.lock()
			.map(|status| *status)
			.unwrap_or(OrderStatus::Pending);
		Ok(Some(OrderStatusResponse::new(order_id, status)))
	}
}
