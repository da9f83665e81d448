//! Test utilities for creating common test objects
//!
//! Builders and fixtures for requests and quotes on Base (WETH -> USDC by
//! default). Enabled for downstream crates through the `test-utils` feature.

use alloy_primitives::{address, Address, Bytes, B256, U256};
use chrono::{Duration, Utc};

use crate::calldata::SwapCalldata;
use crate::models::{Chain, TokenInfo, NATIVE_TOKEN_ADDRESS};
use crate::quotes::{
	OffChainOrder, OnChainRoute, OrderKind, Quote, QuoteMetadata, QuoteRequest, SignableOrder,
};

pub const BASE_WETH: Address = address!("4200000000000000000000000000000000000006");
pub const BASE_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
pub const TEST_USER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const TEST_ROUTER: Address = address!("6131B5fae19EA4f9D964eAc0408E4408b66337b5");
pub const TEST_SPENDER: Address = address!("C92E8bdf79f0507f65a392b0ab4667716BFE0110");

/// Default request: 1 WETH -> USDC on Base
pub fn quote_request() -> QuoteRequest {
	QuoteRequest::new(
		Chain::Base,
		BASE_WETH,
		BASE_USDC,
		U256::from(1_000_000_000_000_000_000u128),
		TEST_USER,
	)
	.with_slippage(0.5)
}

/// On-chain quote paying `output_amount` USDC base units for `gas` units
pub fn on_chain_quote(aggregator: &str, output_amount: u64, gas: u64) -> Quote {
	QuoteBuilder::new(aggregator)
		.output_amount(U256::from(output_amount))
		.gas(gas)
		.build()
}

/// Gasless off-chain-order quote paying `output_amount` USDC base units
pub fn off_chain_quote(aggregator: &str, output_amount: u64) -> Quote {
	QuoteBuilder::new(aggregator)
		.output_amount(U256::from(output_amount))
		.off_chain()
		.build()
}

/// Builder for creating test Quote objects with sensible defaults
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
	aggregator: String,
	chain: Chain,
	input_token: Address,
	output_token: Address,
	input_amount: U256,
	output_amount: U256,
	price_impact: f64,
	gas: u64,
	gas_usd: f64,
	allowance_target: Option<Address>,
	off_chain: bool,
	embed_transaction: bool,
	requires_wrapped_native: bool,
}

impl QuoteBuilder {
	pub fn new(aggregator: &str) -> Self {
		Self {
			aggregator: aggregator.to_string(),
			chain: Chain::Base,
			input_token: BASE_WETH,
			output_token: BASE_USDC,
			input_amount: U256::from(1_000_000_000_000_000_000u128),
			output_amount: U256::from(1_000_000u64),
			price_impact: 0.1,
			gas: 150_000,
			gas_usd: 0.0,
			allowance_target: Some(TEST_ROUTER),
			off_chain: false,
			embed_transaction: true,
			requires_wrapped_native: false,
		}
	}

	pub fn chain(mut self, chain: Chain) -> Self {
		self.chain = chain;
		self
	}

	pub fn tokens(mut self, input: Address, output: Address) -> Self {
		self.input_token = input;
		self.output_token = output;
		self
	}

	/// Sell the native token instead of WETH
	pub fn native_input(mut self) -> Self {
		self.input_token = NATIVE_TOKEN_ADDRESS;
		self
	}

	pub fn input_amount(mut self, amount: U256) -> Self {
		self.input_amount = amount;
		self
	}

	pub fn output_amount(mut self, amount: U256) -> Self {
		self.output_amount = amount;
		self
	}

	pub fn price_impact(mut self, percent: f64) -> Self {
		self.price_impact = percent;
		self
	}

	pub fn gas(mut self, units: u64) -> Self {
		self.gas = units;
		self
	}

	pub fn gas_usd(mut self, usd: f64) -> Self {
		self.gas_usd = usd;
		self
	}

	pub fn allowance_target(mut self, target: Option<Address>) -> Self {
		self.allowance_target = target;
		self
	}

	pub fn without_transaction(mut self) -> Self {
		self.embed_transaction = false;
		self
	}

	pub fn requires_wrapped_native(mut self) -> Self {
		self.requires_wrapped_native = true;
		self
	}

	/// Make the quote a gasless off-chain order
	pub fn off_chain(mut self) -> Self {
		self.off_chain = true;
		self.gas = 0;
		self.allowance_target = Some(TEST_SPENDER);
		self
	}

	pub fn build(self) -> Quote {
		let expires_at = Utc::now() + Duration::seconds(60);
		let metadata = if self.off_chain {
			QuoteMetadata::OffChainOrder(OffChainOrder {
				provider_quote_id: Some("1".to_string()),
				order: SignableOrder {
					owner: TEST_USER,
					sell_token: self.input_token,
					buy_token: self.output_token,
					receiver: TEST_USER,
					sell_amount: self.input_amount,
					buy_amount: self.output_amount,
					fee_amount: U256::ZERO,
					valid_to: expires_at.timestamp() as u32,
					app_data: B256::ZERO,
					kind: OrderKind::Sell,
					partially_fillable: false,
				},
			})
		} else {
			let value = if self.input_token == NATIVE_TOKEN_ADDRESS && !self.requires_wrapped_native
			{
				self.input_amount
			} else {
				U256::ZERO
			};
			QuoteMetadata::OnChain(OnChainRoute {
				router: TEST_ROUTER,
				transaction: self.embed_transaction.then(|| SwapCalldata {
					to: TEST_ROUTER,
					data: Bytes::from_static(&[0x12, 0xaa, 0x3c, 0xaf]),
					value,
					gas_limit: Some(self.gas),
				}),
				requires_wrapped_native: self.requires_wrapped_native,
				provider_quote_id: None,
			})
		};

		Quote {
			aggregator: self.aggregator,
			chain: self.chain,
			input_token: TokenInfo::resolve(self.chain, self.input_token),
			output_token: TokenInfo::resolve(self.chain, self.output_token),
			input_amount: self.input_amount,
			output_amount: self.output_amount,
			price_impact: self.price_impact,
			estimated_gas: self.gas,
			estimated_gas_usd: self.gas_usd,
			allowance_target: self.allowance_target,
			expires_at,
			slippage: 0.5,
			metadata,
		}
	}
}
