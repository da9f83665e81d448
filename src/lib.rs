//! Swap Router Library
//!
//! Quote aggregation and routing engine: queries independent quote providers
//! concurrently, ranks their quotes by net value after execution cost, routes
//! dust amounts to gasless providers and builds executable payloads for the winner.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use swap_adapters::{ClientCache, CowSwapAdapter, CowSwapConfig, ProviderRegistry, RegistryError};
use swap_config::{ConfigLoadError, ConfigValidationError};
use swap_service::{
	BatchQuoteFetcher, BatchQuoteOptions, CalldataBuilder, CalldataResult,
	ChainGasPrice, CostNormalizer, DustRouter, DustTier, GasPriceSource, OptimizerResult,
	OrderService, OrderServiceResult, QuoteOptimizer, QuoteOptions, StaticGasPriceTable,
	TokenAmount,
};
use swap_types::{
	BatchSwapCalldata, Chain, OrderSignature, OrderStatusResponse, Quote, QuoteComparison,
	QuoteProvider, QuoteRequest, SwapCalldata,
};
use thiserror::Error;
use tracing::debug;

// Re-export the domain types callers work with
pub use swap_types::{
	Capability, OrderStatus, Provider, ProviderCapabilities, ProviderError, QuoteMetadata,
	SigningScheme, StepKind, TokenInfo,
};

pub use swap_config::{init_tracing, load_config, load_config_from, Settings};

pub mod models {
	pub use swap_types::*;
}

pub mod adapters {
	pub use swap_adapters::*;
}

pub mod service {
	pub use swap_service::*;
}

pub mod config {
	pub use swap_config::*;
}

// Re-exported for custom provider implementations
pub use async_trait;

#[derive(Debug, Error)]
pub enum BuildError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigLoadError),
	#[error("invalid settings: {0}")]
	InvalidSettings(#[from] ConfigValidationError),
	#[error("provider registration failed: {0}")]
	Registry(#[from] RegistryError),
	#[error("invalid app data hash '{value}'")]
	InvalidAppData { value: String },
	#[error("no quote providers registered")]
	NoProviders,
}

/// Builder pattern for wiring the engine
pub struct SwapRouterBuilder {
	settings: Settings,
	providers: Vec<Arc<dyn QuoteProvider>>,
	gas_source: Option<Arc<dyn GasPriceSource>>,
}

impl Default for SwapRouterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl SwapRouterBuilder {
	/// Builder with default settings and no providers
	pub fn new() -> Self {
		Self {
			settings: Settings::default(),
			providers: Vec::new(),
			gas_source: None,
		}
	}

	/// Load settings from `config/config.*` and the environment
	pub fn from_config() -> Result<Self, BuildError> {
		let settings = load_config()?;
		Self::from_settings(settings)
	}

	/// Builder for `settings`, with the built-in providers it enables
	pub fn from_settings(settings: Settings) -> Result<Self, BuildError> {
		settings.validate()?;

		let mut providers: Vec<Arc<dyn QuoteProvider>> = Vec::new();
		let cowswap = &settings.providers.cowswap;
		if cowswap.enabled {
			let app_data = match &cowswap.app_data {
				Some(value) => B256::from_str(value).map_err(|_| BuildError::InvalidAppData {
					value: value.clone(),
				})?,
				None => B256::ZERO,
			};
			let config = CowSwapConfig {
				base_url: cowswap.base_url.clone(),
				timeout_ms: cowswap
					.timeout_ms
					.unwrap_or(settings.timeouts.per_provider_ms),
				app_data,
			};
			let cache =
				ClientCache::with_ttl(Duration::from_secs(settings.timeouts.client_cache_ttl_secs));
			providers.push(Arc::new(CowSwapAdapter::with_cache(config, cache)));
		} else {
			debug!("CoW Swap provider disabled in settings");
		}

		Ok(Self {
			settings,
			providers,
			gas_source: None,
		})
	}

	/// Register an additional provider after the configured ones
	pub fn with_provider(mut self, provider: Arc<dyn QuoteProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	/// Replace the settings-derived gas price table
	pub fn with_gas_source(mut self, source: Arc<dyn GasPriceSource>) -> Self {
		self.gas_source = Some(source);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	fn gas_table(settings: &Settings) -> StaticGasPriceTable {
		let overrides = settings.gas.chains.iter().map(|(chain, price)| {
			(
				*chain,
				ChainGasPrice::new(price.gas_price_gwei, price.native_price_usd),
			)
		});
		let table = StaticGasPriceTable::new().with_overrides(overrides);
		match settings.gas.fallback {
			Some(fallback) => table.with_fallback(ChainGasPrice::new(
				fallback.gas_price_gwei,
				fallback.native_price_usd,
			)),
			None => table,
		}
	}

	pub fn build(self) -> Result<QuoteEngine, BuildError> {
		let Self {
			settings,
			providers,
			gas_source,
		} = self;

		let mut registry = ProviderRegistry::new();
		for provider in providers {
			registry.register(provider)?;
		}
		if registry.is_empty() {
			return Err(BuildError::NoProviders);
		}
		let registry = Arc::new(registry);

		let gas_source =
			gas_source.unwrap_or_else(|| Arc::new(Self::gas_table(&settings)) as Arc<dyn GasPriceSource>);
		let optimizer = QuoteOptimizer::new(registry.clone(), CostNormalizer::new(gas_source));

		let tiers = settings
			.dust
			.tiers
			.iter()
			.map(|tier| DustTier::new(tier.max_amount_usd, tier.capabilities.iter().copied()))
			.collect();

		let quote_options = QuoteOptions::default()
			.with_max_price_impact(settings.optimizer.max_price_impact_percent)
			.with_timeout(Duration::from_millis(settings.timeouts.per_provider_ms));

		let engine = QuoteEngine {
			dust: DustRouter::with_tiers(optimizer.clone(), tiers),
			batch: BatchQuoteFetcher::new(optimizer.clone()),
			calldata: CalldataBuilder::new(registry.clone()),
			orders: OrderService::new(registry.clone()),
			optimizer,
			registry,
			quote_options,
			batch_window: settings.batch.window_size,
		};

		swap_config::log_service_info();
		swap_config::log_settings(&settings);
		swap_config::log_engine_ready(&engine.registry.ids());
		Ok(engine)
	}
}

/// Entry point for every quoting, calldata and order operation
#[derive(Clone)]
pub struct QuoteEngine {
	registry: Arc<ProviderRegistry>,
	optimizer: QuoteOptimizer,
	dust: DustRouter,
	batch: BatchQuoteFetcher,
	calldata: CalldataBuilder,
	orders: OrderService,
	quote_options: QuoteOptions,
	batch_window: usize,
}

impl QuoteEngine {
	/// Ranking criteria from settings; callers adjust per request
	pub fn quote_options(&self) -> QuoteOptions {
		self.quote_options.clone()
	}

	/// Batch options from settings
	pub fn batch_options(&self) -> BatchQuoteOptions {
		BatchQuoteOptions::default()
			.with_window_size(self.batch_window)
			.with_quote_options(self.quote_options.clone())
	}

	pub fn registry(&self) -> &Arc<ProviderRegistry> {
		&self.registry
	}

	pub async fn get_best_quote(
		&self,
		request: &QuoteRequest,
		options: &QuoteOptions,
	) -> OptimizerResult<QuoteComparison> {
		self.optimizer.get_best_quote(request, options).await
	}

	/// Dust routing with the configured tiers and default options
	pub async fn get_dust_quote(
		&self,
		request: &QuoteRequest,
		amount_usd: f64,
	) -> OptimizerResult<Quote> {
		self.dust
			.get_dust_quote(request, amount_usd, &self.quote_options)
			.await
	}

	/// Raw quotes from the named providers under the configured timeout
	pub async fn get_quotes_from_aggregators(
		&self,
		request: &QuoteRequest,
		provider_ids: &[String],
	) -> Vec<Quote> {
		self.optimizer
			.get_quotes_from_aggregators(request, provider_ids, self.quote_options.timeout)
			.await
	}

	pub async fn get_batch_quotes(
		&self,
		chain: Chain,
		tokens: &[TokenAmount],
		output_token: Address,
		user_address: Address,
		options: &BatchQuoteOptions,
	) -> HashMap<Address, Quote> {
		self.batch
			.get_batch_quotes(chain, tokens, output_token, user_address, options)
			.await
	}

	pub async fn build_swap_calldata(&self, quote: &Quote) -> CalldataResult<SwapCalldata> {
		self.calldata.build_swap_calldata(quote).await
	}

	pub async fn build_complete_swap_calldata(
		&self,
		quote: &Quote,
		chain: Chain,
		needs_approval: bool,
		needs_wrap: Option<bool>,
	) -> CalldataResult<BatchSwapCalldata> {
		self.calldata
			.build_complete_swap_calldata(quote, chain, needs_approval, needs_wrap)
			.await
	}

	pub async fn build_batch_swap_calldata(
		&self,
		quotes: &[Quote],
		chain: Chain,
		approved: &HashMap<Address, bool>,
	) -> Vec<CalldataResult<BatchSwapCalldata>> {
		self.calldata
			.build_batch_swap_calldata(quotes, chain, approved)
			.await
	}

	pub async fn create_order(
		&self,
		quote: &Quote,
		signature: &OrderSignature,
	) -> OrderServiceResult<Option<String>> {
		self.orders.create_order(quote, signature).await
	}

	pub async fn get_order_status(
		&self,
		chain: Chain,
		order_id: &str,
	) -> OrderServiceResult<Option<OrderStatusResponse>> {
		self.orders.get_order_status(chain, order_id).await
	}

	pub fn is_chain_supported(&self, chain: Chain) -> bool {
		self.registry.is_chain_supported(chain)
	}

	/// Ids of the providers serving `chain`, in registration order
	pub fn get_available_aggregators(&self, chain: Chain) -> Vec<String> {
		let ids = self.registry.available_provider_ids(chain);
		debug!("{} aggregators available on {}", ids.len(), chain);
		ids
	}
}
