//! Helpers for integer token amounts
//!
//! Amounts stay `U256` in the token's smallest unit everywhere they are compared
//! or settled. Conversion to `f64` only happens when an amount is priced in fiat.

use alloy_primitives::U256;

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Convert a percentage (e.g. `0.5` for 0.5%) to basis points, rounding to nearest
pub fn percent_to_bps(percent: f64) -> u64 {
	if !percent.is_finite() || percent <= 0.0 {
		return 0;
	}
	((percent * 100.0).round() as u64).min(BPS_DENOMINATOR)
}

/// Minimum amount after applying a slippage tolerance given in percent
pub fn apply_slippage(amount: U256, slippage_percent: f64) -> U256 {
	let keep = U256::from(BPS_DENOMINATOR - percent_to_bps(slippage_percent));
	let denominator = U256::from(BPS_DENOMINATOR);
	// Split to avoid overflow near U256::MAX
	amount / denominator * keep + amount % denominator * keep / denominator
}

/// Approximate the amount in whole-token units for fiat pricing
pub fn to_units_f64(amount: U256, decimals: u8) -> f64 {
	let raw = amount.to_string().parse::<f64>().unwrap_or(f64::MAX);
	raw / 10f64.powi(i32::from(decimals))
}
