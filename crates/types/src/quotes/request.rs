//! Quote request model and validation

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::limits::{DEFAULT_SLIPPAGE_PERCENT, MAX_SLIPPAGE_PERCENT};
use crate::models::Chain;

use super::{QuoteValidationError, QuoteValidationResult};

/// A request to convert `input_amount` of `input_token` into `output_token`.
///
/// Requests are immutable once handed to the optimizer; every provider call
/// receives its own clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	pub chain: Chain,
	pub input_token: Address,
	pub output_token: Address,
	/// Amount in the smallest unit of the input token
	pub input_amount: U256,
	pub user_address: Address,
	/// Recipient of the output; defaults to `user_address`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub receiver: Option<Address>,
	/// Slippage tolerance in percent (0.5 = 0.5%)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slippage: Option<f64>,
	/// Provider ids that must not be queried
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub exclude_aggregators: Vec<String>,
	/// Ask providers to embed transaction data in the quote when they can
	#[serde(default)]
	pub include_calldata: bool,
}

impl QuoteRequest {
	pub fn new(
		chain: Chain,
		input_token: Address,
		output_token: Address,
		input_amount: U256,
		user_address: Address,
	) -> Self {
		Self {
			chain,
			input_token,
			output_token,
			input_amount,
			user_address,
			receiver: None,
			slippage: None,
			exclude_aggregators: Vec::new(),
			include_calldata: false,
		}
	}

	pub fn with_slippage(mut self, slippage: f64) -> Self {
		self.slippage = Some(slippage);
		self
	}

	pub fn with_receiver(mut self, receiver: Address) -> Self {
		self.receiver = Some(receiver);
		self
	}

	pub fn excluding<I, S>(mut self, providers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude_aggregators
			.extend(providers.into_iter().map(Into::into));
		self
	}

	pub fn with_calldata(mut self, include: bool) -> Self {
		self.include_calldata = include;
		self
	}

	/// Effective slippage tolerance in percent
	pub fn slippage_or_default(&self) -> f64 {
		self.slippage.unwrap_or(DEFAULT_SLIPPAGE_PERCENT)
	}

	/// Effective receiver of the output tokens
	pub fn receiver_or_user(&self) -> Address {
		self.receiver.unwrap_or(self.user_address)
	}

	pub fn is_excluded(&self, provider_id: &str) -> bool {
		self.exclude_aggregators
			.iter()
			.any(|excluded| excluded.eq_ignore_ascii_case(provider_id))
	}

	/// Reject requests no provider could meaningfully quote
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if self.input_amount.is_zero() {
			return Err(QuoteValidationError::InvalidAmount {
				field: "inputAmount".to_string(),
				reason: "must be greater than zero".to_string(),
			});
		}

		if self.input_token == self.output_token {
			return Err(QuoteValidationError::IdenticalTokens {
				token: self.input_token,
			});
		}

		if let Some(slippage) = self.slippage {
			if !slippage.is_finite() || !(0.0..=MAX_SLIPPAGE_PERCENT).contains(&slippage) {
				return Err(QuoteValidationError::InvalidSlippageTolerance {
					value: slippage,
					max: MAX_SLIPPAGE_PERCENT,
				});
			}
		}

		Ok(())
	}
}
