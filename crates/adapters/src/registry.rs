//! Provider registry
//!
//! Built once at start-up and handed to the services. Registration order is
//! preserved so fan-out and tie-breaking are deterministic.

use std::sync::Arc;
use swap_types::{Capability, Chain, QuoteProvider};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	#[error("Provider already registered: {provider_id}")]
	AlreadyRegistered { provider_id: String },
}

#[derive(Debug, Default, Clone)]
pub struct ProviderRegistry {
	providers: Vec<Arc<dyn QuoteProvider>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, provider: Arc<dyn QuoteProvider>) -> Result<(), RegistryError> {
		if self.get(provider.id()).is_some() {
			return Err(RegistryError::AlreadyRegistered {
				provider_id: provider.id().to_string(),
			});
		}
		debug!("Registered quote provider {}", provider.id());
		self.providers.push(provider);
		Ok(())
	}

	pub fn get(&self, provider_id: &str) -> Option<Arc<dyn QuoteProvider>> {
		self.providers
			.iter()
			.find(|provider| provider.id() == provider_id)
			.cloned()
	}

	/// Providers serving `chain`, in registration order
	pub fn available_for(&self, chain: Chain) -> Vec<Arc<dyn QuoteProvider>> {
		self.providers
			.iter()
			.filter(|provider| provider.is_available(chain))
			.cloned()
			.collect()
	}

	/// Providers serving `chain` that carry the given capability
	pub fn with_capability(&self, chain: Chain, capability: Capability) -> Vec<Arc<dyn QuoteProvider>> {
		self.available_for(chain)
			.into_iter()
			.filter(|provider| provider.capabilities().has(capability))
			.collect()
	}

	pub fn ids(&self) -> Vec<String> {
		self.providers
			.iter()
			.map(|provider| provider.id().to_string())
			.collect()
	}

	pub fn is_chain_supported(&self, chain: Chain) -> bool {
		self.providers.iter().any(|provider| provider.is_available(chain))
	}

	pub fn available_provider_ids(&self, chain: Chain) -> Vec<String> {
		self.available_for(chain)
			.iter()
			.map(|provider| provider.id().to_string())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}
