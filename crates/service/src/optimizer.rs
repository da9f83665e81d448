//! Quote optimizer
//!
//! Fans a request out to every available provider, absorbs individual
//! failures, normalizes execution cost and ranks the survivors by net value.

use alloy_primitives::U256;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use swap_adapters::ProviderRegistry;
use swap_types::constants::limits::{
	DEFAULT_MAX_PRICE_IMPACT_PERCENT, DEFAULT_OUTPUT_PRICE_USD, DEFAULT_PROVIDER_TIMEOUT_MS,
};
use swap_types::{Chain, Quote, QuoteComparison, QuoteProvider, QuoteRequest, QuoteValidationError};
use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::gas::CostNormalizer;

#[derive(Debug, Error)]
pub enum OptimizerError {
	#[error("no providers available on {chain}")]
	NoProvidersAvailable { chain: Chain },
	#[error("no quotes received from {queried} providers on {chain}")]
	NoQuotesReceived { chain: Chain, queried: usize },
	#[error("invalid request: {0}")]
	InvalidRequest(#[from] QuoteValidationError),
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;

/// Per-call ranking criteria
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOptions {
	/// Quotes below this output are dropped unless none remain
	pub min_output: Option<U256>,
	/// Price impact ceiling in percent
	pub max_price_impact: f64,
	/// USD price of one output token; 1.0 when absent
	pub output_price_usd: Option<f64>,
	/// Deadline applied to each provider independently
	pub timeout: Duration,
}

impl Default for QuoteOptions {
	fn default() -> Self {
		Self {
			min_output: None,
			max_price_impact: DEFAULT_MAX_PRICE_IMPACT_PERCENT,
			output_price_usd: None,
			timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
		}
	}
}

impl QuoteOptions {
	pub fn with_min_output(mut self, min_output: U256) -> Self {
		self.min_output = Some(min_output);
		self
	}

	pub fn with_max_price_impact(mut self, percent: f64) -> Self {
		self.max_price_impact = percent;
		self
	}

	pub fn with_output_price_usd(mut self, price: f64) -> Self {
		self.output_price_usd = Some(price);
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	fn accepts(&self, quote: &Quote) -> bool {
		let output_ok = self
			.min_output
			.map_or(true, |min_output| quote.output_amount >= min_output);
		output_ok && quote.price_impact <= self.max_price_impact
	}
}

#[derive(Clone)]
pub struct QuoteOptimizer {
	registry: Arc<ProviderRegistry>,
	normalizer: CostNormalizer,
}

impl QuoteOptimizer {
	pub fn new(registry: Arc<ProviderRegistry>, normalizer: CostNormalizer) -> Self {
		Self {
			registry,
			normalizer,
		}
	}

	pub fn registry(&self) -> &Arc<ProviderRegistry> {
		&self.registry
	}

	pub fn normalizer(&self) -> &CostNormalizer {
		&self.normalizer
	}

	/// Best quote for `request` across all available, non-excluded providers
	pub async fn get_best_quote(
		&self,
		request: &QuoteRequest,
		options: &QuoteOptions,
	) -> OptimizerResult<QuoteComparison> {
		request.validate()?;

		let providers: Vec<Arc<dyn QuoteProvider>> = self
			.registry
			.available_for(request.chain)
			.into_iter()
			.filter(|provider| !request.is_excluded(provider.id()))
			.collect();

		if providers.is_empty() {
			return Err(OptimizerError::NoProvidersAvailable {
				chain: request.chain,
			});
		}

		let queried = providers.len();
		info!(
			"Fetching quotes on {} from {} providers",
			request.chain, queried
		);

		let quotes = Self::fan_out(providers, request, options.timeout).await;
		if quotes.is_empty() {
			return Err(OptimizerError::NoQuotesReceived {
				chain: request.chain,
				queried,
			});
		}

		let comparison = self
			.rank(quotes, request.chain, options)
			.ok_or(OptimizerError::NoQuotesReceived {
				chain: request.chain,
				queried,
			})?;

		info!(
			"Quote aggregation completed on {}: {} quotes from {} providers, best {}",
			request.chain,
			comparison.len(),
			queried,
			comparison.best.aggregator
		);
		Ok(comparison)
	}

	/// Raw quotes from the named providers that serve the request's chain
	pub async fn get_quotes_from_aggregators(
		&self,
		request: &QuoteRequest,
		provider_ids: &[String],
		timeout: Duration,
	) -> Vec<Quote> {
		let providers: Vec<Arc<dyn QuoteProvider>> = self
			.registry
			.available_for(request.chain)
			.into_iter()
			.filter(|provider| provider_ids.iter().any(|id| id == provider.id()))
			.collect();

		if providers.is_empty() {
			debug!(
				"None of {:?} serve {}, returning no quotes",
				provider_ids, request.chain
			);
			return Vec::new();
		}

		Self::fan_out(providers, request, timeout).await
	}

	/// Normalize, filter and rank quotes. `None` only for an empty input.
	pub fn rank(
		&self,
		mut quotes: Vec<Quote>,
		chain: Chain,
		options: &QuoteOptions,
	) -> Option<QuoteComparison> {
		for quote in quotes.iter_mut() {
			self.normalizer.normalize(quote, chain);
		}

		let output_price_usd = options.output_price_usd.unwrap_or_else(|| {
			debug!(
				"No output price supplied, assuming ${} per output token",
				DEFAULT_OUTPUT_PRICE_USD
			);
			DEFAULT_OUTPUT_PRICE_USD
		});

		let total = quotes.len();
		let accepted: Vec<Quote> = quotes
			.iter()
			.filter(|quote| options.accepts(quote))
			.cloned()
			.collect();

		let criteria_relaxed = accepted.is_empty() && total > 0;
		let mut ranked = if criteria_relaxed {
			warn!(
				"None of {} quotes met min_output={:?} max_price_impact={}%, ranking all",
				total, options.min_output, options.max_price_impact
			);
			quotes
		} else {
			accepted
		};

		// Stable: ties keep provider registration order
		ranked.sort_by(|a, b| {
			b.net_value(output_price_usd)
				.total_cmp(&a.net_value(output_price_usd))
		});

		QuoteComparison::from_ranked(ranked, output_price_usd, criteria_relaxed)
	}

	/// Query one provider under a deadline; failures become `None`
	pub async fn fetch_from_provider(
		provider: Arc<dyn QuoteProvider>,
		request: QuoteRequest,
		deadline: Duration,
	) -> Option<Quote> {
		let started = Instant::now();
		debug!("Starting quote fetch from provider {}", provider.id());

		match timeout(deadline, provider.get_quote(&request)).await {
			Ok(Ok(Some(quote))) => {
				debug!(
					"Got quote from {} in {}ms: output {}",
					provider.id(),
					started.elapsed().as_millis(),
					quote.output_amount
				);
				Some(quote)
			},
			Ok(Ok(None)) => {
				debug!("Provider {} has no route", provider.id());
				None
			},
			Ok(Err(e)) => {
				warn!("Provider {} returned error: {}", provider.id(), e);
				None
			},
			Err(_) => {
				warn!(
					"Provider {} timed out after {}ms",
					provider.id(),
					deadline.as_millis()
				);
				None
			},
		}
	}

	async fn fan_out(
		providers: Vec<Arc<dyn QuoteProvider>>,
		request: &QuoteRequest,
		deadline: Duration,
	) -> Vec<Quote> {
		let tasks = providers.into_iter().map(|provider| {
			let request = request.clone();
			tokio::spawn(Self::fetch_from_provider(provider, request, deadline))
		});

		join_all(tasks)
			.await
			.into_iter()
			.filter_map(|result| match result {
				Ok(quote) => quote,
				Err(e) => {
					warn!("Provider task failed: {}", e);
					None
				},
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gas::{ChainGasPrice, StaticGasPriceTable};
	use crate::test_support::{registry_of, TestProvider};
	use swap_types::test_utils::{quote_request, QuoteBuilder};

	fn optimizer(providers: Vec<TestProvider>) -> QuoteOptimizer {
		let table = StaticGasPriceTable::uniform(ChainGasPrice::new(1.0, 1000.0));
		QuoteOptimizer::new(registry_of(providers), CostNormalizer::new(Arc::new(table)))
	}

	fn fast() -> QuoteOptions {
		QuoteOptions::default().with_timeout(Duration::from_millis(200))
	}

	#[tokio::test]
	async fn test_ranks_by_net_value() {
		let optimizer = optimizer(vec![
			TestProvider::quoting("low", 1_000_000),
			TestProvider::quoting("high", 3_000_000),
			TestProvider::quoting("mid", 2_000_000),
		]);

		let comparison = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap();
		let order: Vec<&str> = comparison.all.iter().map(|q| q.aggregator.as_str()).collect();
		assert_eq!(order, vec!["high", "mid", "low"]);
		assert_eq!(comparison.best, comparison.all[0]);
		assert!(!comparison.criteria_relaxed);
	}

	#[tokio::test]
	async fn test_gas_can_flip_ranking() {
		// 1M gas * 1 gwei * $1000 = $1 of cost, outweighing the 0.5 USDC edge
		let optimizer = optimizer(vec![
			TestProvider::with_quote(
				"expensive",
				QuoteBuilder::new("expensive")
					.output_amount(U256::from(2_500_000u64))
					.gas(1_000_000)
					.build(),
			),
			TestProvider::with_quote(
				"gasless",
				QuoteBuilder::new("gasless")
					.output_amount(U256::from(2_000_000u64))
					.off_chain()
					.build(),
			),
		]);

		let comparison = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap();
		assert_eq!(comparison.best.aggregator, "gasless");
		assert!((comparison.all[1].estimated_gas_usd - 1.0).abs() < 1e-9);
	}

	#[tokio::test]
	async fn test_failures_and_timeouts_absorbed() {
		let optimizer = optimizer(vec![
			TestProvider::failing("broken"),
			TestProvider::quoting("slow", 9_000_000).delayed(Duration::from_millis(500)),
			TestProvider::no_route("empty"),
			TestProvider::quoting("ok", 1_000_000),
		]);

		let comparison = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap();
		assert_eq!(comparison.len(), 1);
		assert_eq!(comparison.best.aggregator, "ok");
	}

	#[tokio::test]
	async fn test_all_failing_is_an_error() {
		let optimizer = optimizer(vec![
			TestProvider::failing("a"),
			TestProvider::quoting("b", 1).delayed(Duration::from_millis(500)),
		]);

		let err = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap_err();
		assert!(matches!(err, OptimizerError::NoQuotesReceived { queried: 2, .. }));
	}

	#[tokio::test]
	async fn test_no_providers_after_exclusion() {
		let optimizer = optimizer(vec![TestProvider::quoting("only", 1)]);
		let request = quote_request().excluding(["only"]);

		let err = optimizer.get_best_quote(&request, &fast()).await.unwrap_err();
		assert!(matches!(
			err,
			OptimizerError::NoProvidersAvailable { chain: Chain::Base }
		));
	}

	#[tokio::test]
	async fn test_invalid_request_rejected_before_fan_out() {
		let provider = TestProvider::quoting("only", 1);
		let calls = provider.calls();
		let optimizer = optimizer(vec![provider]);
		let mut request = quote_request();
		request.input_amount = U256::ZERO;

		let err = optimizer.get_best_quote(&request, &fast()).await.unwrap_err();
		assert!(matches!(err, OptimizerError::InvalidRequest(_)));
		assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_criteria_filter_and_fallback() {
		let optimizer = optimizer(vec![
			TestProvider::quoting("a", 1_000_000),
			TestProvider::quoting("b", 2_000_000),
		]);

		let filtered = optimizer
			.get_best_quote(
				&quote_request(),
				&fast().with_min_output(U256::from(1_500_000u64)),
			)
			.await
			.unwrap();
		assert_eq!(filtered.len(), 1);
		assert!(!filtered.criteria_relaxed);

		let relaxed = optimizer
			.get_best_quote(
				&quote_request(),
				&fast().with_min_output(U256::from(5_000_000u64)),
			)
			.await
			.unwrap();
		assert_eq!(relaxed.len(), 2);
		assert!(relaxed.criteria_relaxed);
		assert_eq!(relaxed.best.aggregator, "b");
	}

	#[tokio::test]
	async fn test_price_impact_filter() {
		let optimizer = optimizer(vec![
			TestProvider::with_quote(
				"risky",
				QuoteBuilder::new("risky")
					.output_amount(U256::from(5_000_000u64))
					.price_impact(12.0)
					.build(),
			),
			TestProvider::quoting("safe", 1_000_000),
		]);

		let comparison = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap();
		assert_eq!(comparison.len(), 1);
		assert_eq!(comparison.best.aggregator, "safe");
	}

	#[tokio::test]
	async fn test_output_price_scales_savings() {
		let optimizer = optimizer(vec![
			TestProvider::quoting("a", 2_000_000),
			TestProvider::quoting("b", 1_000_000),
		]);

		let comparison = optimizer
			.get_best_quote(&quote_request(), &fast().with_output_price_usd(2.0))
			.await
			.unwrap();
		assert_eq!(comparison.output_price_usd, 2.0);
		assert!((comparison.savings.vs_worst_usd - 2.0).abs() < 1e-9);
	}

	#[tokio::test]
	async fn test_ties_keep_registration_order() {
		let optimizer = optimizer(vec![
			TestProvider::quoting("first", 1_000_000),
			TestProvider::quoting("second", 1_000_000),
		]);

		let comparison = optimizer.get_best_quote(&quote_request(), &fast()).await.unwrap();
		assert_eq!(comparison.best.aggregator, "first");
	}

	#[tokio::test]
	async fn test_named_aggregators_only() {
		let skipped = TestProvider::quoting("skipped", 9_000_000);
		let skipped_calls = skipped.calls();
		let optimizer = optimizer(vec![skipped, TestProvider::quoting("named", 1_000_000)]);

		let quotes = optimizer
			.get_quotes_from_aggregators(
				&quote_request(),
				&["named".to_string(), "unknown".to_string()],
				Duration::from_millis(200),
			)
			.await;
		assert_eq!(quotes.len(), 1);
		assert_eq!(quotes[0].aggregator, "named");
		assert_eq!(quotes[0].estimated_gas_usd, 0.0);
		assert_eq!(skipped_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
	}
}
