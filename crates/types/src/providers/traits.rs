//! Provider capability interface

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Provider, ProviderCapabilities, ProviderError, ProviderResult};
use crate::calldata::SwapCalldata;
use crate::models::Chain;
use crate::orders::{OrderSignature, OrderStatusResponse};
use crate::quotes::{Quote, QuoteMetadata, QuoteRequest};

/// Interface every quote source implements
///
/// Only `provider_info` and `get_quote` are required. Order methods default to
/// `UnsupportedOperation`; providers whose quotes are off-chain orders
/// override them.
#[async_trait]
pub trait QuoteProvider: Send + Sync + Debug {
	/// Static descriptor: id, capabilities and supported chains
	fn provider_info(&self) -> &Provider;

	fn id(&self) -> &str {
		&self.provider_info().provider_id
	}

	fn name(&self) -> &str {
		&self.provider_info().name
	}

	fn capabilities(&self) -> ProviderCapabilities {
		self.provider_info().capabilities
	}

	/// Pure chain-support check; never performs I/O
	fn is_available(&self, chain: Chain) -> bool {
		self.provider_info().supports_chain(chain)
	}

	/// Quote the request. `Ok(None)` means no route exists.
	async fn get_quote(&self, request: &QuoteRequest) -> ProviderResult<Option<Quote>>;

	/// Transaction for an on-chain quote
	///
	/// Default implementation returns the transaction embedded in the quote.
	async fn build_swap_calldata(&self, quote: &Quote) -> ProviderResult<SwapCalldata> {
		match &quote.metadata {
			QuoteMetadata::OnChain(route) => {
				route
					.transaction
					.clone()
					.ok_or_else(|| ProviderError::InvalidResponse {
						reason: format!(
							"quote from {} carries no transaction data",
							quote.aggregator
						),
					})
			},
			QuoteMetadata::OffChainOrder(_) => {
				Err(ProviderError::unsupported("build_swap_calldata", self.id()))
			},
		}
	}

	/// Submit a signed order; returns the provider's order id
	///
	/// Default implementation returns UnsupportedOperation error.
	async fn create_order(
		&self,
		_quote: &Quote,
		_signature: &OrderSignature,
	) -> ProviderResult<Option<String>> {
		Err(ProviderError::unsupported("create_order", self.id()))
	}

	/// Current status of an order; `Ok(None)` when the provider does not know it
	///
	/// Default implementation returns UnsupportedOperation error.
	async fn get_order_status(
		&self,
		_chain: Chain,
		_order_id: &str,
	) -> ProviderResult<Option<OrderStatusResponse>> {
		Err(ProviderError::unsupported("get_order_status", self.id()))
	}
}
