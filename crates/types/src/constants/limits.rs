//! Global limits and defaults for configuration and runtime

/// Minimum allowed per-provider timeout in milliseconds
pub const MIN_PROVIDER_TIMEOUT_MS: u64 = 100; // 100ms

/// Maximum allowed per-provider timeout in milliseconds
pub const MAX_PROVIDER_TIMEOUT_MS: u64 = 60_000; // 60s

/// Default per-provider quote timeout in milliseconds
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000; // 10s

/// Default slippage tolerance in percent
pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5;

/// Maximum accepted slippage tolerance in percent
pub const MAX_SLIPPAGE_PERCENT: f64 = 50.0;

/// Default maximum price impact accepted by the optimizer, in percent
pub const DEFAULT_MAX_PRICE_IMPACT_PERCENT: f64 = 5.0;

/// Output-token price assumed when the caller supplies none (stablecoin assumption)
pub const DEFAULT_OUTPUT_PRICE_USD: f64 = 1.0;

/// Dust amounts below this value (USD) short-circuit to a gasless provider
pub const DEFAULT_DUST_GASLESS_THRESHOLD_USD: f64 = 5.0;

/// Dust amounts below this value (USD) short-circuit to an intent-based provider
pub const DEFAULT_DUST_INTENT_THRESHOLD_USD: f64 = 20.0;

/// Default number of tokens quoted concurrently by the batch fetcher
pub const DEFAULT_BATCH_WINDOW_SIZE: usize = 5;

/// Upper bound for the batch window to protect provider rate limits
pub const MAX_BATCH_WINDOW_SIZE: usize = 50;

/// Quote validity used when a provider does not report an expiry
pub const DEFAULT_QUOTE_EXPIRY_SECONDS: i64 = 60;

/// Tracked orders kept before settled ones are evicted
pub const MAX_TRACKED_ORDERS: usize = 10_000;
