//! Order service
//!
//! Submits signed off-chain orders and tracks their lifecycle. Terminal
//! orders are answered from the tracker without re-querying the provider
//! until the tracker outgrows its capacity and evicts them.

use dashmap::DashMap;
use std::sync::Arc;
use swap_adapters::ProviderRegistry;
use swap_types::constants::limits::MAX_TRACKED_ORDERS;
use swap_types::{
	Capability, Chain, OrderSignature, OrderStatus, OrderStatusResponse, ProviderError, Quote,
	QuoteProvider,
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum OrderServiceError {
	#[error("quote from {0} is not an off-chain order")]
	NotOffChainOrder(String),
	#[error("quote from {0} has expired")]
	QuoteExpired(String),
	#[error("provider not found: {0}")]
	ProviderNotFound(String),
	#[error("provider {0} does not accept off-chain orders")]
	OrdersUnsupported(String),
	#[error("provider error: {0}")]
	Provider(#[from] ProviderError),
}

pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

#[derive(Debug, Clone)]
struct TrackedOrder {
	provider_id: String,
	chain: Chain,
	latest: OrderStatusResponse,
}

#[derive(Clone)]
pub struct OrderService {
	registry: Arc<ProviderRegistry>,
	orders: Arc<DashMap<String, TrackedOrder>>,
	capacity: usize,
}

impl OrderService {
	pub fn new(registry: Arc<ProviderRegistry>) -> Self {
		Self::with_capacity(registry, MAX_TRACKED_ORDERS)
	}

	/// Settled orders are evicted once more than `capacity` are tracked
	pub fn with_capacity(registry: Arc<ProviderRegistry>, capacity: usize) -> Self {
		Self {
			registry,
			orders: Arc::new(DashMap::new()),
			capacity,
		}
	}

	/// Submit a signed off-chain order; returns the provider's order id
	pub async fn create_order(
		&self,
		quote: &Quote,
		signature: &OrderSignature,
	) -> OrderServiceResult<Option<String>> {
		if quote.off_chain_order().is_none() {
			return Err(OrderServiceError::NotOffChainOrder(quote.aggregator.clone()));
		}
		if quote.is_expired() {
			return Err(OrderServiceError::QuoteExpired(quote.aggregator.clone()));
		}

		let provider = self
			.registry
			.get(&quote.aggregator)
			.ok_or_else(|| OrderServiceError::ProviderNotFound(quote.aggregator.clone()))?;

		if !provider.capabilities().off_chain_orders {
			return Err(OrderServiceError::OrdersUnsupported(
				provider.id().to_string(),
			));
		}

		let order_id = provider.create_order(quote, signature).await?;
		match &order_id {
			Some(id) => {
				info!("Created order {} with {}", id, provider.id());
				self.orders.insert(
					id.clone(),
					TrackedOrder {
						provider_id: provider.id().to_string(),
						chain: quote.chain,
						latest: OrderStatusResponse::new(id.clone(), OrderStatus::Created),
					},
				);
				self.enforce_capacity();
			},
			None => warn!("Provider {} did not return an order id", provider.id()),
		}

		Ok(order_id)
	}

	/// Current status of an order.
	///
	/// Untracked ids are looked up across every order-capable provider on
	/// `chain` and tracked from then on.
	pub async fn get_order_status(
		&self,
		chain: Chain,
		order_id: &str,
	) -> OrderServiceResult<Option<OrderStatusResponse>> {
		let tracked = self.orders.get(order_id).map(|entry| entry.value().clone());

		match tracked {
			Some(tracked) if tracked.latest.status.is_terminal() => {
				debug!(
					"Order {} is {}, returning cached status",
					order_id, tracked.latest.status
				);
				Ok(Some(tracked.latest))
			},
			Some(tracked) => {
				let provider = self
					.registry
					.get(&tracked.provider_id)
					.ok_or_else(|| OrderServiceError::ProviderNotFound(tracked.provider_id.clone()))?;

				match provider.get_order_status(tracked.chain, order_id).await? {
					Some(reported) => Ok(Some(self.record(&tracked.provider_id, tracked.chain, reported))),
					None => Ok(Some(tracked.latest)),
				}
			},
			None => self.discover(chain, order_id).await,
		}
	}

	/// Last known status without contacting any provider
	pub fn tracked_status(&self, order_id: &str) -> Option<OrderStatus> {
		self.orders.get(order_id).map(|entry| entry.latest.status)
	}

	pub fn tracked_count(&self) -> usize {
		self.orders.len()
	}

	/// Drop every order in a terminal state; returns how many were removed
	pub fn evict_terminal(&self) -> usize {
		let before = self.orders.len();
		self.orders
			.retain(|_, tracked| !tracked.latest.status.is_terminal());
		let removed = before.saturating_sub(self.orders.len());
		if removed > 0 {
			debug!("Evicted {} settled orders from the tracker", removed);
		}
		removed
	}

	fn enforce_capacity(&self) {
		if self.orders.len() > self.capacity {
			self.evict_terminal();
		}
	}

	async fn discover(
		&self,
		chain: Chain,
		order_id: &str,
	) -> OrderServiceResult<Option<OrderStatusResponse>> {
		let providers: Vec<Arc<dyn QuoteProvider>> = self
			.registry
			.with_capability(chain, Capability::OffChainOrders);
		let mut last_error = None;

		for provider in providers {
			match provider.get_order_status(chain, order_id).await {
				Ok(Some(reported)) => {
					debug!("Order {} found at {}", order_id, provider.id());
					return Ok(Some(self.record(provider.id(), chain, reported)));
				},
				Ok(None) => continue,
				Err(e) => {
					warn!(
						"Order status lookup at {} failed for {}: {}",
						provider.id(),
						order_id,
						e
					);
					last_error = Some(e);
				},
			}
		}

		match last_error {
			Some(e) => Err(e.into()),
			None => Ok(None),
		}
	}

	/// Apply a provider report if the transition is valid; returns the tracked state
	fn record(
		&self,
		provider_id: &str,
		chain: Chain,
		reported: OrderStatusResponse,
	) -> OrderStatusResponse {
		let latest = self.apply_report(provider_id, chain, reported);
		self.enforce_capacity();
		latest
	}

	fn apply_report(
		&self,
		provider_id: &str,
		chain: Chain,
		reported: OrderStatusResponse,
	) -> OrderStatusResponse {
		let mut entry = self
			.orders
			.entry(reported.order_id.clone())
			.or_insert_with(|| TrackedOrder {
				provider_id: provider_id.to_string(),
				chain,
				latest: reported.clone(),
			});

		let current = entry.latest.status;
		if current.can_transition_to(reported.status) {
			if current != reported.status {
				info!(
					"Order {} moved {} -> {}",
					reported.order_id, current, reported.status
				);
			}
			entry.latest = reported;
		} else {
			warn!(
				"Ignoring invalid order transition {} -> {} for {}",
				current, reported.status, reported.order_id
			);
		}

		entry.latest.clone()
	}
}
