//! Swap Types
//!
//! Shared models and traits for the swap router: chains and tokens, quote
//! requests and results, off-chain orders, calldata and the provider
//! capability interface.

pub mod calldata;
pub mod constants;
pub mod models;
pub mod orders;
pub mod providers;
pub mod quotes;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export chrono and alloy primitives for convenience
pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use chrono;

pub use calldata::{BatchSwapCalldata, CallStep, StepKind, SwapCalldata};

pub use models::{
	apply_slippage, is_native_token, percent_to_bps, to_units_f64, Chain, TokenInfo,
	UnknownChainError, NATIVE_TOKEN_ADDRESS,
};

pub use orders::{OrderSignature, OrderStatus, OrderStatusResponse, SigningScheme};

pub use providers::{
	Capability, Provider, ProviderCapabilities, ProviderError, ProviderResult, QuoteProvider,
};

pub use quotes::{
	OffChainOrder, OnChainRoute, OrderKind, Quote, QuoteComparison, QuoteMetadata, QuoteRequest,
	QuoteSavings, QuoteValidationError, QuoteValidationResult, SignableOrder,
};
