//! Scriptable providers for unit tests

use alloy_primitives::U256;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use swap_adapters::ProviderRegistry;
use swap_types::test_utils::QuoteBuilder;
use swap_types::{
	Chain, OrderSignature, OrderStatus, OrderStatusResponse, Provider, ProviderCapabilities,
	ProviderError, ProviderResult, Quote, QuoteProvider, QuoteRequest,
};

#[derive(Debug, Clone)]
enum Outcome {
	Quote(Box<Quote>),
	NoRoute,
	Fail,
}

#[derive(Debug, Clone)]
pub struct TestProvider {
	info: Provider,
	outcome: Outcome,
	delay: Duration,
	calls: Arc<AtomicUsize>,
	in_flight: Arc<AtomicUsize>,
	peak: Arc<AtomicUsize>,
	order_status: Arc<Mutex<Option<OrderStatus>>>,
	status_calls: Arc<AtomicUsize>,
}

impl TestProvider {
	fn new(id: &str, outcome: Outcome) -> Self {
		Self {
			info: Provider::new(id, id, "0.0.1").with_chains([Chain::Base, Chain::Ethereum]),
			outcome,
			delay: Duration::ZERO,
			calls: Arc::new(AtomicUsize::new(0)),
			in_flight: Arc::new(AtomicUsize::new(0)),
			peak: Arc::new(AtomicUsize::new(0)),
			order_status: Arc::new(Mutex::new(None)),
			status_calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn quoting(id: &str, output_amount: u64) -> Self {
		let quote = QuoteBuilder::new(id)
			.output_amount(U256::from(output_amount))
			.build();
		Self::with_quote(id, quote)
	}

	pub fn with_quote(id: &str, quote: Quote) -> Self {
		Self::new(id, Outcome::Quote(Box::new(quote)))
	}

	/// Gasless off-chain-order provider that also accepts orders
	pub fn gasless(id: &str, output_amount: u64) -> Self {
		let quote = QuoteBuilder::new(id)
			.output_amount(U256::from(output_amount))
			.off_chain()
			.build();
		Self::with_quote(id, quote).capabilities(ProviderCapabilities {
			gasless: true,
			off_chain_orders: true,
			intent_based: true,
		})
	}

	pub fn no_route(id: &str) -> Self {
		Self::new(id, Outcome::NoRoute)
	}

	pub fn failing(id: &str) -> Self {
		Self::new(id, Outcome::Fail)
	}

	pub fn delayed(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
		self.info.capabilities = capabilities;
		self
	}

	pub fn on_chains(mut self, chains: &[Chain]) -> Self {
		self.info.supported_chains = chains.to_vec();
		self
	}

	pub fn calls(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.calls)
	}

	pub fn peak_concurrency(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.peak)
	}

	pub fn status_calls(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.status_calls)
	}

	/// Handle for scripting the status reported by `get_order_status`
	pub fn order_status(&self) -> Arc<Mutex<Option<OrderStatus>>> {
		Arc::clone(&self.order_status)
	}
}

#[async_trait]
impl QuoteProvider for TestProvider {
	fn provider_info(&self) -> &Provider {
		&self.info
	}

	async fn get_quote(&self, request: &QuoteRequest) -> ProviderResult<Option<Quote>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.peak.fetch_max(current, Ordering::SeqCst);

		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}
		self.in_flight.fetch_sub(1, Ordering::SeqCst);

		match &self.outcome {
			Outcome::Quote(quote) => {
				let mut quote = (**quote).clone();
				quote.chain = request.chain;
				quote.input_token.address = request.input_token;
				quote.input_amount = request.input_amount;
				Ok(Some(quote))
			},
			Outcome::NoRoute => Ok(None),
			Outcome::Fail => Err(ProviderError::from_http_failure(500)),
		}
	}

	async fn create_order(
		&self,
		quote: &Quote,
		_signature: &OrderSignature,
	) -> ProviderResult<Option<String>> {
		if !self.info.capabilities.off_chain_orders {
			return Err(ProviderError::unsupported("create_order", self.id()));
		}
		Ok(Some(format!("order-{}", quote.aggregator)))
	}

	async fn get_order_status(
		&self,
		_chain: Chain,
		order_id: &str,
	) -> ProviderResult<Option<OrderStatusResponse>> {
		self.status_calls.fetch_add(1, Ordering::SeqCst);
		let status = *self
			.order_status
			.lock()
			.map_err(|_| ProviderError::from_http_failure(500))?;
		Ok(status.map(|status| OrderStatusResponse::new(order_id, status)))
	}
}

pub fn registry_of(providers: Vec<TestProvider>) -> Arc<ProviderRegistry> {
	let mut registry = ProviderRegistry::new();
	for provider in providers {
		registry.register(Arc::new(provider)).unwrap();
	}
	Arc::new(registry)
}
