//! Quote provider descriptor and capability model

use serde::{Deserialize, Serialize};

use crate::models::Chain;

pub mod errors;
pub mod traits;

pub use errors::ProviderError;
pub use traits::QuoteProvider;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// What a provider can do beyond plain quoting
///
/// Routing decisions key off these flags rather than provider ids, so a new
/// gasless provider needs no changes in the optimizer or dust router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapabilities {
	/// The user pays no gas to execute this provider's quotes
	pub gasless: bool,
	/// Quotes are executed by submitting a signed order
	pub off_chain_orders: bool,
	/// Fills are produced by solvers competing on intents
	pub intent_based: bool,
}

impl ProviderCapabilities {
	pub fn has(&self, capability: Capability) -> bool {
		match capability {
			Capability::Gasless => self.gasless,
			Capability::OffChainOrders => self.off_chain_orders,
			Capability::IntentBased => self.intent_based,
		}
	}
}

/// Single capability flag, used to select providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	Gasless,
	OffChainOrders,
	IntentBased,
}

/// Static description of a registered provider
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
	/// Unique identifier used for registration and exclusion lists
	pub provider_id: String,
	pub name: String,
	pub version: String,
	pub capabilities: ProviderCapabilities,
	pub supported_chains: Vec<Chain>,
}

impl Provider {
	pub fn new(
		provider_id: impl Into<String>,
		name: impl Into<String>,
		version: impl Into<String>,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			name: name.into(),
			version: version.into(),
			capabilities: ProviderCapabilities::default(),
			supported_chains: Vec::new(),
		}
	}

	pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
		self.capabilities = capabilities;
		self
	}

	pub fn with_chains(mut self, chains: impl IntoIterator<Item = Chain>) -> Self {
		self.supported_chains = chains.into_iter().collect();
		self
	}

	pub fn supports_chain(&self, chain: Chain) -> bool {
		self.supported_chains.contains(&chain)
	}
}
