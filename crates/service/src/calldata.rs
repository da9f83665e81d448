//! Calldata builder
//!
//! Turns a winning on-chain quote into an ordered call sequence:
//! `[wrap] [approve] swap`. Each prerequisite is its own call. Off-chain
//! order quotes have no calldata and must go through order creation.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use swap_adapters::ProviderRegistry;
use swap_types::{
	is_native_token, BatchSwapCalldata, CallStep, Chain, ProviderError, Quote, StepKind,
	SwapCalldata,
};
use thiserror::Error;
use tracing::debug;

sol! {
	interface IERC20 {
		function approve(address spender, uint256 amount) external returns (bool);
	}

	interface IWrappedNative {
		function deposit() external payable;
	}
}

#[derive(Debug, Error)]
pub enum CalldataError {
	#[error("quote from {provider_id} is an off-chain order; use create_order instead of building calldata")]
	UnsupportedOperation { provider_id: String },
	#[error("provider not found: {provider_id}")]
	ProviderNotFound { provider_id: String },
	#[error("provider error: {0}")]
	Provider(#[from] ProviderError),
}

pub type CalldataResult<T> = Result<T, CalldataError>;

/// ABI-encoded `approve(spender, amount)`
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
	IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// ABI-encoded `deposit()` on the wrapped native token
pub fn encode_deposit() -> Bytes {
	IWrappedNative::depositCall {}.abi_encode().into()
}

#[derive(Clone)]
pub struct CalldataBuilder {
	registry: Arc<ProviderRegistry>,
}

impl CalldataBuilder {
	pub fn new(registry: Arc<ProviderRegistry>) -> Self {
		Self { registry }
	}

	/// The provider's swap transaction for an on-chain quote
	pub async fn build_swap_calldata(&self, quote: &Quote) -> CalldataResult<SwapCalldata> {
		if quote.off_chain_order().is_some() {
			return Err(CalldataError::UnsupportedOperation {
				provider_id: quote.aggregator.clone(),
			});
		}

		let provider =
			self.registry
				.get(&quote.aggregator)
				.ok_or_else(|| CalldataError::ProviderNotFound {
					provider_id: quote.aggregator.clone(),
				})?;

		Ok(provider.build_swap_calldata(quote).await?)
	}

	/// Full call sequence for one quote.
	///
	/// `needs_wrap` overrides the route's own wrapped-native requirement and
	/// only applies to native input.
	pub async fn build_complete_swap_calldata(
		&self,
		quote: &Quote,
		chain: Chain,
		needs_approval: bool,
		needs_wrap: Option<bool>,
	) -> CalldataResult<BatchSwapCalldata> {
		let swap = self.build_swap_calldata(quote).await?;
		let requires_wrapped_native = quote
			.on_chain_route()
			.map_or(false, |route| route.requires_wrapped_native);

		let native_input = is_native_token(&quote.input_token.address);
		let wrap = native_input && needs_wrap.unwrap_or(requires_wrapped_native);
		let spend_token = if wrap {
			chain.wrapped_native()
		} else {
			quote.input_token.address
		};

		let mut steps = Vec::with_capacity(3);

		if wrap {
			steps.push(CallStep {
				kind: StepKind::Wrap,
				to: spend_token,
				data: encode_deposit(),
				value: quote.input_amount,
				gas_limit: None,
			});
		}

		if needs_approval && !is_native_token(&spend_token) {
			match quote.allowance_target {
				Some(spender) => steps.push(CallStep {
					kind: StepKind::Approve,
					to: spend_token,
					data: encode_approve(spender, quote.input_amount),
					value: U256::ZERO,
					gas_limit: None,
				}),
				None => debug!(
					"Quote from {} has no allowance target, skipping approval",
					quote.aggregator
				),
			}
		}

		steps.push(CallStep::from(swap));

		debug!(
			"Built {} call steps for {} on {}",
			steps.len(),
			quote.aggregator,
			chain
		);

		Ok(BatchSwapCalldata {
			chain,
			input_token: spend_token,
			steps,
		})
	}

	/// One independently built sequence per quote.
	///
	/// `approved` maps input token to "allowance already sufficient"; a
	/// missing entry means an approval step is needed.
	pub async fn build_batch_swap_calldata(
		&self,
		quotes: &[Quote],
		chain: Chain,
		approved: &HashMap<Address, bool>,
	) -> Vec<CalldataResult<BatchSwapCalldata>> {
		let builds = quotes.iter().map(|quote| {
			let already_approved = approved
				.get(&quote.input_token.address)
				.copied()
				.unwrap_or(false);
			self.build_complete_swap_calldata(quote, chain, !already_approved, None)
		});
		join_all(builds).await
	}
}
