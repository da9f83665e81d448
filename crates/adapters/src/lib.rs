//! Swap Adapters
//!
//! Quote provider implementations and the registry that holds them.

pub mod client_cache;
pub mod cowswap_adapter;
pub mod registry;

pub use client_cache::{global_client_cache, ClientCache, ClientConfig};
pub use cowswap_adapter::{CowSwapAdapter, CowSwapConfig, COWSWAP_PROVIDER_ID, GPV2_VAULT_RELAYER};
pub use registry::{ProviderRegistry, RegistryError};
pub use swap_types::{ProviderError, ProviderResult, QuoteProvider};
