//! Execution cost normalization
//!
//! Converts a quote's gas units into USD so quotes from providers that price
//! gas differently can be ranked on one axis.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use swap_types::{Chain, Quote};
use tracing::debug;

/// Gas price and native-token price for one chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainGasPrice {
	pub gas_price_gwei: f64,
	pub native_price_usd: f64,
}

impl ChainGasPrice {
	pub const fn new(gas_price_gwei: f64, native_price_usd: f64) -> Self {
		Self {
			gas_price_gwei,
			native_price_usd,
		}
	}

	/// USD cost of `gas_units` at this price
	pub fn cost_usd(&self, gas_units: u64) -> f64 {
		gas_units as f64 * self.gas_price_gwei * 1e-9 * self.native_price_usd
	}
}

/// Overestimates rather than under-ranks a chain nobody configured
pub const CONSERVATIVE_GAS_PRICE: ChainGasPrice = ChainGasPrice::new(50.0, 3000.0);

#[cfg_attr(test, mockall::automock)]
pub trait GasPriceSource: Send + Sync {
	fn gas_price(&self, chain: Chain) -> ChainGasPrice;
}

/// Read-only per-chain price table, shared lock-free across requests
#[derive(Debug, Clone)]
pub struct StaticGasPriceTable {
	prices: HashMap<Chain, ChainGasPrice>,
	fallback: ChainGasPrice,
}

impl StaticGasPriceTable {
	pub fn new() -> Self {
		let prices = HashMap::from([
			(Chain::Ethereum, ChainGasPrice::new(20.0, 3000.0)),
			(Chain::Base, ChainGasPrice::new(0.01, 3000.0)),
			(Chain::Arbitrum, ChainGasPrice::new(0.1, 3000.0)),
			(Chain::Optimism, ChainGasPrice::new(0.01, 3000.0)),
			(Chain::Polygon, ChainGasPrice::new(50.0, 0.5)),
			(Chain::Bsc, ChainGasPrice::new(3.0, 600.0)),
			(Chain::Linea, ChainGasPrice::new(0.1, 3000.0)),
			(Chain::Avalanche, ChainGasPrice::new(25.0, 30.0)),
			(Chain::Gnosis, ChainGasPrice::new(2.0, 1.0)),
			(Chain::Sepolia, ChainGasPrice::new(1.0, 0.0)),
		]);
		Self {
			prices,
			fallback: CONSERVATIVE_GAS_PRICE,
		}
	}

	/// Replace the entries for the given chains
	pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (Chain, ChainGasPrice)>) -> Self {
		self.prices.extend(overrides);
		self
	}

	pub fn with_fallback(mut self, fallback: ChainGasPrice) -> Self {
		self.fallback = fallback;
		self
	}

	/// Table with no per-chain entries; every chain gets `fallback`
	pub fn uniform(fallback: ChainGasPrice) -> Self {
		Self {
			prices: HashMap::new(),
			fallback,
		}
	}
}

impl Default for StaticGasPriceTable {
	fn default() -> Self {
		Self::new()
	}
}

impl GasPriceSource for StaticGasPriceTable {
	fn gas_price(&self, chain: Chain) -> ChainGasPrice {
		self.prices.get(&chain).copied().unwrap_or(self.fallback)
	}
}

#[derive(Clone)]
pub struct CostNormalizer {
	source: Arc<dyn GasPriceSource>,
}

impl CostNormalizer {
	pub fn new(source: Arc<dyn GasPriceSource>) -> Self {
		Self { source }
	}

	/// USD execution cost of `quote` on `chain`.
	///
	/// A provider-supplied nonzero value is kept; gasless quotes cost nothing.
	pub fn calculate_gas_cost_usd(&self, quote: &Quote, chain: Chain) -> f64 {
		if quote.estimated_gas_usd > 0.0 {
			return quote.estimated_gas_usd;
		}
		if quote.is_gasless() || quote.estimated_gas == 0 {
			return 0.0;
		}
		let cost = self.source.gas_price(chain).cost_usd(quote.estimated_gas);
		debug!(
			"Gas cost for {} on {}: {} units = ${:.4}",
			quote.aggregator, chain, quote.estimated_gas, cost
		);
		cost
	}

	pub fn normalize(&self, quote: &mut Quote, chain: Chain) {
		quote.estimated_gas_usd = self.calculate_gas_cost_usd(quote, chain);
	}
}

impl Default for CostNormalizer {
	fn default() -> Self {
		Self::new(Arc::new(StaticGasPriceTable::new()))
	}
}
