//! HTTP client cache shared by HTTP-backed providers
//!
//! Clients are keyed by provider endpoint so connection pools are reused
//! across quote calls and rebuilt after a TTL.

use dashmap::{mapref::entry::Entry, DashMap};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use swap_types::{ProviderError, ProviderResult};
use tracing::debug;

const USER_AGENT: &str = "swap-router/0.1";

/// Connection settings for one provider endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Provider identifier for cache differentiation
	pub provider_id: String,
	pub base_url: String,
	/// Request timeout enforced by reqwest, independent of the optimizer deadline
	pub timeout_ms: u64,
	pub max_idle_per_host: usize,
	pub keep_alive_timeout_ms: u64,
	/// Default headers sent with every request
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	pub fn new(provider_id: impl Into<String>, base_url: impl Into<String>, timeout_ms: u64) -> Self {
		Self {
			provider_id: provider_id.into(),
			base_url: base_url.into(),
			timeout_ms,
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			headers: vec![("Content-Type".to_string(), "application/json".to_string())],
		}
	}
}

#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe TTL cache of reqwest clients
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create a client for the given endpoint
	pub fn get_client(&self, config: &ClientConfig) -> ProviderResult<Arc<Client>> {
		self.clients.remove_if(config, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				debug!(
					"Client for {} expired after {:?}, rebuilding",
					config.provider_id,
					cached.created_at.elapsed()
				);
			}
			expired
		});

		if let Some(cached) = self.clients.get(config) {
			return Ok(cached.client.clone());
		}

		debug!("Creating HTTP client for {} ({})", config.provider_id, config.base_url);
		let cached = CachedClient::new(Self::build_client(config)?);

		// Another task may have inserted meanwhile; keep whichever landed first
		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().client.clone()),
			Entry::Vacant(entry) => Ok(entry.insert(cached).client.clone()),
		}
	}

	fn build_client(config: &ClientConfig) -> ProviderResult<Client> {
		let mut header_map = reqwest::header::HeaderMap::new();
		for (key, value) in &config.headers {
			if let (Ok(name), Ok(value)) = (
				reqwest::header::HeaderName::from_bytes(key.as_bytes()),
				reqwest::header::HeaderValue::from_str(value),
			) {
				header_map.insert(name, value);
			}
		}

		ClientBuilder::new()
			.user_agent(USER_AGENT)
			.timeout(Duration::from_millis(config.timeout_ms))
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.tcp_keepalive(Duration::from_secs(60))
			.default_headers(header_map)
			.build()
			.map_err(ProviderError::HttpError)
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

lazy_static::lazy_static! {
	static ref GLOBAL_CLIENT_CACHE: ClientCache = ClientCache::new();
}

/// Process-wide cache shared by providers that do not bring their own
pub fn global_client_cache() -> ClientCache {
	GLOBAL_CLIENT_CACHE.clone()
}
