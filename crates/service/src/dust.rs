//! Dust routing
//!
//! For small amounts, execution cost dominates any price difference, so a
//! ladder of USD thresholds sends the request straight to a cheap-to-execute
//! provider before falling back to full comparison.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use swap_types::constants::limits::{
	DEFAULT_DUST_GASLESS_THRESHOLD_USD, DEFAULT_DUST_INTENT_THRESHOLD_USD,
};
use swap_types::{Capability, Quote, QuoteRequest};
use tracing::{debug, info};

use crate::optimizer::{OptimizerResult, QuoteOptimizer, QuoteOptions};

/// One rung of the dust ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DustTier {
	/// Applies when the amount is strictly below this value
	pub max_amount_usd: f64,
	/// A provider qualifies if it has any of these
	pub capabilities: Vec<Capability>,
}

impl DustTier {
	pub fn new(max_amount_usd: f64, capabilities: impl IntoIterator<Item = Capability>) -> Self {
		Self {
			max_amount_usd,
			capabilities: capabilities.into_iter().collect(),
		}
	}

	/// `< 5 USD` gasless, then `< 20 USD` intent-based or gasless
	pub fn default_ladder() -> Vec<DustTier> {
		vec![
			DustTier::new(DEFAULT_DUST_GASLESS_THRESHOLD_USD, [Capability::Gasless]),
			DustTier::new(
				DEFAULT_DUST_INTENT_THRESHOLD_USD,
				[Capability::IntentBased, Capability::Gasless],
			),
		]
	}
}

#[derive(Clone)]
pub struct DustRouter {
	optimizer: QuoteOptimizer,
	tiers: Vec<DustTier>,
}

impl DustRouter {
	pub fn new(optimizer: QuoteOptimizer) -> Self {
		Self::with_tiers(optimizer, DustTier::default_ladder())
	}

	/// Tiers are evaluated in the given order
	pub fn with_tiers(optimizer: QuoteOptimizer, tiers: Vec<DustTier>) -> Self {
		Self { optimizer, tiers }
	}

	pub fn tiers(&self) -> &[DustTier] {
		&self.tiers
	}

	/// Quote for a swap worth `amount_usd`.
	///
	/// Each applicable tier queries its first qualifying provider alone and
	/// returns that quote, with its gas cost filled in, if there is one. A tier with no quote falls through
	/// to the next, and finally to the full optimizer.
	pub async fn get_dust_quote(
		&self,
		request: &QuoteRequest,
		amount_usd: f64,
		options: &QuoteOptions,
	) -> OptimizerResult<Quote> {
		request.validate()?;

		let registry = self.optimizer.registry();
		let mut tried: HashSet<String> = HashSet::new();

		for tier in self.tiers.iter().filter(|tier| amount_usd < tier.max_amount_usd) {
			let candidate = registry
				.available_for(request.chain)
				.into_iter()
				.filter(|provider| !request.is_excluded(provider.id()))
				.filter(|provider| !tried.contains(provider.id()))
				.find(|provider| {
					tier.capabilities
						.iter()
						.any(|capability| provider.capabilities().has(*capability))
				});

			let Some(provider) = candidate else {
				debug!(
					"No provider for dust tier < ${} on {}",
					tier.max_amount_usd, request.chain
				);
				continue;
			};

			tried.insert(provider.id().to_string());
			let provider_id = provider.id().to_string();
			if let Some(mut quote) =
				QuoteOptimizer::fetch_from_provider(provider, request.clone(), options.timeout).await
			{
				self.optimizer.normalizer().normalize(&mut quote, request.chain);
				info!(
					"Dust amount ${:.2} routed to {} (tier < ${})",
					amount_usd, provider_id, tier.max_amount_usd
				);
				return Ok(quote);
			}
		}

		debug!(
			"Dust ladder exhausted for ${:.2}, running full comparison",
			amount_usd
		);
		self.optimizer
			.get_best_quote(request, options)
			.await
			.map(|comparison| comparison.best)
	}
}
