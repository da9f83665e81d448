//! Core Quote domain model
//!
//! A [`Quote`] is one provider's answer to a [`QuoteRequest`]. Provider-specific
//! execution data lives in [`QuoteMetadata`], a union keyed by how the quote is
//! executed, so downstream builders pattern-match instead of inspecting ids.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calldata::SwapCalldata;
use crate::models::{to_units_f64, Chain, TokenInfo};

pub mod comparison;
pub mod errors;
pub mod request;

pub use comparison::{QuoteComparison, QuoteSavings};
pub use errors::QuoteValidationError;
pub use request::QuoteRequest;

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

/// A normalized quote from a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Id of the provider that produced this quote
	pub aggregator: String,
	pub chain: Chain,
	pub input_token: TokenInfo,
	pub output_token: TokenInfo,
	pub input_amount: U256,
	/// Expected output before slippage
	pub output_amount: U256,
	/// Price impact in percent
	pub price_impact: f64,
	/// Gas units; zero for gasless routes
	pub estimated_gas: u64,
	/// Execution cost in USD; zero until normalized
	pub estimated_gas_usd: f64,
	/// Spender the user must approve before an on-chain swap
	pub allowance_target: Option<Address>,
	pub expires_at: DateTime<Utc>,
	/// Slippage tolerance (percent) the quote was priced with
	pub slippage: f64,
	pub metadata: QuoteMetadata,
}

impl Quote {
	/// Off-chain orders are settled by a third party and cost the user no gas
	pub fn is_gasless(&self) -> bool {
		matches!(self.metadata, QuoteMetadata::OffChainOrder(_))
	}

	pub fn is_expired(&self) -> bool {
		Utc::now() > self.expires_at
	}

	/// Output amount in whole token units
	pub fn output_units(&self) -> f64 {
		to_units_f64(self.output_amount, self.output_token.decimals)
	}

	/// Output value in USD minus execution cost; the sole ranking criterion
	pub fn net_value(&self, output_price_usd: f64) -> f64 {
		self.output_units() * output_price_usd - self.estimated_gas_usd
	}

	pub fn on_chain_route(&self) -> Option<&OnChainRoute> {
		match &self.metadata {
			QuoteMetadata::OnChain(route) => Some(route),
			QuoteMetadata::OffChainOrder(_) => None,
		}
	}

	pub fn off_chain_order(&self) -> Option<&OffChainOrder> {
		match &self.metadata {
			QuoteMetadata::OffChainOrder(order) => Some(order),
			QuoteMetadata::OnChain(_) => None,
		}
	}
}

/// Provider-specific execution payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuoteMetadata {
	/// Executed by the user sending a transaction to a router contract
	OnChain(OnChainRoute),
	/// Executed by signing an order that a solver settles off the user's account
	OffChainOrder(OffChainOrder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainRoute {
	/// Contract the swap transaction targets
	pub router: Address,
	/// Ready-made transaction, when the provider returned one with the quote
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transaction: Option<SwapCalldata>,
	/// The router only accepts the wrapped native token
	#[serde(default)]
	pub requires_wrapped_native: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider_quote_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffChainOrder {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider_quote_id: Option<String>,
	/// Order the user signs and submits through `create_order`
	pub order: SignableOrder,
}

/// Order body as it will be signed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignableOrder {
	/// Account that signs the order and whose tokens are sold
	pub owner: Address,
	pub sell_token: Address,
	pub buy_token: Address,
	pub receiver: Address,
	pub sell_amount: U256,
	/// Minimum buy amount after slippage
	pub buy_amount: U256,
	pub fee_amount: U256,
	/// Unix timestamp after which the order can no longer be filled
	pub valid_to: u32,
	pub app_data: B256,
	pub kind: OrderKind,
	pub partially_fillable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
	Sell,
	Buy,
}

impl OrderKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderKind::Sell => "sell",
			OrderKind::Buy => "buy",
		}
	}
}
