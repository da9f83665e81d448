//! Configuration settings structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use swap_types::constants::limits::{
	DEFAULT_BATCH_WINDOW_SIZE, DEFAULT_DUST_GASLESS_THRESHOLD_USD,
	DEFAULT_DUST_INTENT_THRESHOLD_USD, DEFAULT_MAX_PRICE_IMPACT_PERCENT,
	DEFAULT_PROVIDER_TIMEOUT_MS, MAX_BATCH_WINDOW_SIZE, MAX_PROVIDER_TIMEOUT_MS,
	MIN_PROVIDER_TIMEOUT_MS,
};
use swap_types::{Capability, Chain};
use thiserror::Error;

/// Main engine settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
	pub timeouts: TimeoutSettings,
	pub optimizer: OptimizerSettings,
	pub dust: DustSettings,
	pub batch: BatchSettings,
	pub gas: GasSettings,
	pub providers: ProviderSettings,
	pub logging: LoggingSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Deadline for each provider's quote call
	pub per_provider_ms: u64,
	/// Lifetime of pooled HTTP clients
	pub client_cache_ttl_secs: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_provider_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			client_cache_ttl_secs: 30 * 60,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptimizerSettings {
	/// Default price impact ceiling in percent
	pub max_price_impact_percent: f64,
}

impl Default for OptimizerSettings {
	fn default() -> Self {
		Self {
			max_price_impact_percent: DEFAULT_MAX_PRICE_IMPACT_PERCENT,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DustTierSettings {
	pub max_amount_usd: f64,
	pub capabilities: Vec<Capability>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DustSettings {
	/// Evaluated in order; thresholds must be increasing
	pub tiers: Vec<DustTierSettings>,
}

impl Default for DustSettings {
	fn default() -> Self {
		Self {
			tiers: vec![
				DustTierSettings {
					max_amount_usd: DEFAULT_DUST_GASLESS_THRESHOLD_USD,
					capabilities: vec![Capability::Gasless],
				},
				DustTierSettings {
					max_amount_usd: DEFAULT_DUST_INTENT_THRESHOLD_USD,
					capabilities: vec![Capability::IntentBased, Capability::Gasless],
				},
			],
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchSettings {
	pub window_size: usize,
}

impl Default for BatchSettings {
	fn default() -> Self {
		Self {
			window_size: DEFAULT_BATCH_WINDOW_SIZE,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GasPriceSettings {
	pub gas_price_gwei: f64,
	pub native_price_usd: f64,
}

/// Overrides for the built-in gas price table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GasSettings {
	pub chains: HashMap<Chain, GasPriceSettings>,
	/// Used for chains with no entry
	pub fallback: Option<GasPriceSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ProviderSettings {
	pub cowswap: CowSwapSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CowSwapSettings {
	pub enabled: bool,
	pub base_url: String,
	/// Falls back to `timeouts.per_provider_ms`
	pub timeout_ms: Option<u64>,
	/// 32-byte hex app data hash attached to orders
	pub app_data: Option<String>,
}

impl Default for CowSwapSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			base_url: "https://api.cow.fi".to_string(),
			timeout_ms: None,
			app_data: None,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	/// Include targets and thread ids
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("timeouts.per_provider_ms must be between {min} and {max}, got {value}")]
	ProviderTimeout { value: u64, min: u64, max: u64 },
	#[error("batch.window_size must be between 1 and {max}, got {value}")]
	WindowSize { value: usize, max: usize },
	#[error("dust tier thresholds must be positive and increasing: {reason}")]
	DustTiers { reason: String },
	#[error("gas price for {chain} must be non-negative")]
	GasPrice { chain: String },
	#[error("optimizer.max_price_impact_percent must be within 0..=100, got {value}")]
	PriceImpact { value: f64 },
}

impl Settings {
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		let timeout = self.timeouts.per_provider_ms;
		let cow_timeout = self.providers.cowswap.timeout_ms.unwrap_or(timeout);
		for value in [timeout, cow_timeout] {
			if !(MIN_PROVIDER_TIMEOUT_MS..=MAX_PROVIDER_TIMEOUT_MS).contains(&value) {
				return Err(ConfigValidationError::ProviderTimeout {
					value,
					min: MIN_PROVIDER_TIMEOUT_MS,
					max: MAX_PROVIDER_TIMEOUT_MS,
				});
			}
		}

		let window = self.batch.window_size;
		if window == 0 || window > MAX_BATCH_WINDOW_SIZE {
			return Err(ConfigValidationError::WindowSize {
				value: window,
				max: MAX_BATCH_WINDOW_SIZE,
			});
		}

		let impact = self.optimizer.max_price_impact_percent;
		if !(0.0..=100.0).contains(&impact) {
			return Err(ConfigValidationError::PriceImpact { value: impact });
		}

		let mut previous = 0.0;
		for tier in &self.dust.tiers {
			if tier.max_amount_usd <= previous {
				return Err(ConfigValidationError::DustTiers {
					reason: format!("{} does not exceed {}", tier.max_amount_usd, previous),
				});
			}
			if tier.capabilities.is_empty() {
				return Err(ConfigValidationError::DustTiers {
					reason: format!("tier < {} names no capability", tier.max_amount_usd),
				});
			}
			previous = tier.max_amount_usd;
		}

		let entries = self
			.gas
			.chains
			.iter()
			.map(|(chain, price)| (chain.to_string(), price))
			.chain(self.gas.fallback.iter().map(|price| ("fallback".to_string(), price)));
		for (chain, price) in entries {
			if price.gas_price_gwei < 0.0 || price.native_price_usd < 0.0 {
				return Err(ConfigValidationError::GasPrice { chain });
			}
		}

		Ok(())
	}
}
