//! Shared domain models used across providers, services and configuration

pub mod amount;
pub mod chain;
pub mod token;

pub use amount::{apply_slippage, percent_to_bps, to_units_f64};
pub use chain::{Chain, UnknownChainError};
pub use token::{
	is_native_token, TokenInfo, DEFAULT_TOKEN_DECIMALS, NATIVE_TOKEN_ADDRESS, UNKNOWN_TOKEN_SYMBOL,
};
