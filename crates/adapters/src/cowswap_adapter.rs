//! CoW Swap adapter implementation
//!
//! Quotes are signed sell orders settled by CoW Protocol solvers, so the user
//! pays no gas. Orders are submitted and tracked through the order book API.
//! Native sells are not quotable; the user must wrap first.

use alloy_primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swap_types::constants::limits::{DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_QUOTE_EXPIRY_SECONDS};
use swap_types::{
	apply_slippage, is_native_token, Chain, OffChainOrder, OrderKind, OrderSignature,
	OrderStatus, OrderStatusResponse, Provider, ProviderCapabilities, ProviderError,
	ProviderResult, Quote, QuoteMetadata, QuoteProvider, QuoteRequest, SignableOrder, TokenInfo,
};
use tracing::{debug, warn};

use crate::client_cache::{global_client_cache, ClientCache, ClientConfig};

pub const COWSWAP_PROVIDER_ID: &str = "cowswap";

pub const DEFAULT_COWSWAP_BASE_URL: &str = "https://api.cow.fi";

/// GPv2 vault relayer; the spender users approve for CoW orders on every chain
pub const GPV2_VAULT_RELAYER: Address = address!("C92E8bdf79f0507f65a392b0ab4667716BFE0110");

/// Quote errors that mean "no route" rather than a provider failure
const NO_ROUTE_ERRORS: &[&str] = &[
	"NoLiquidity",
	"UnsupportedToken",
	"SellAmountDoesNotCoverFee",
	"ZeroAmount",
	"TransferEthToContract",
];

// ================================
// COW API MODELS
// ================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CowQuoteRequest {
	pub sell_token: Address,
	pub buy_token: Address,
	pub receiver: Address,
	pub from: Address,
	pub kind: OrderKind,
	/// Decimal string; the API rejects hex amounts
	pub sell_amount_before_fee: String,
	pub app_data: B256,
	pub partially_fillable: bool,
	pub signing_scheme: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowQuoteResponse {
	pub quote: CowOrderParameters,
	#[serde(default)]
	pub expiration: Option<String>,
	#[serde(default)]
	pub id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowOrderParameters {
	pub sell_token: Address,
	pub buy_token: Address,
	#[serde(default)]
	pub receiver: Option<Address>,
	pub sell_amount: String,
	pub buy_amount: String,
	pub fee_amount: String,
	pub valid_to: u32,
	#[serde(default)]
	pub partially_fillable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CowOrderCreation {
	pub sell_token: Address,
	pub buy_token: Address,
	pub receiver: Address,
	pub sell_amount: String,
	pub buy_amount: String,
	pub valid_to: u32,
	pub fee_amount: String,
	pub kind: OrderKind,
	pub partially_fillable: bool,
	pub app_data: B256,
	pub signing_scheme: &'static str,
	pub signature: String,
	pub from: Address,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quote_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowOrder {
	pub uid: String,
	pub status: String,
	#[serde(default)]
	pub executed_sell_amount: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowTrade {
	#[serde(default)]
	pub tx_hash: Option<B256>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CowApiError {
	pub error_type: String,
	#[serde(default)]
	pub description: String,
}

// ================================
// ADAPTER
// ================================

/// Runtime configuration for the CoW Swap adapter
#[derive(Debug, Clone, PartialEq)]
pub struct CowSwapConfig {
	pub base_url: String,
	pub timeout_ms: u64,
	/// App data hash attached to every order
	pub app_data: B256,
}

impl Default for CowSwapConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_COWSWAP_BASE_URL.to_string(),
			timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			app_data: B256::ZERO,
		}
	}
}

#[derive(Debug)]
pub struct CowSwapAdapter {
	info: Provider,
	config: CowSwapConfig,
	cache: ClientCache,
}

impl CowSwapAdapter {
	pub const SUPPORTED_CHAINS: [Chain; 5] = [
		Chain::Ethereum,
		Chain::Gnosis,
		Chain::Arbitrum,
		Chain::Base,
		Chain::Sepolia,
	];

	pub fn new(config: CowSwapConfig) -> Self {
		Self::with_cache(config, global_client_cache())
	}

	pub fn with_cache(config: CowSwapConfig, cache: ClientCache) -> Self {
		let info = Provider::new(COWSWAP_PROVIDER_ID, "CoW Swap", "1.0.0")
			.with_capabilities(ProviderCapabilities {
				gasless: true,
				off_chain_orders: true,
				intent_based: true,
			})
			.with_chains(Self::SUPPORTED_CHAINS);
		Self {
			info,
			config,
			cache,
		}
	}

	pub fn with_default_config() -> Self {
		Self::new(CowSwapConfig::default())
	}

	/// Path segment of the order book API for a chain
	pub fn network_name(chain: Chain) -> Option<&'static str> {
		match chain {
			Chain::Ethereum => Some("mainnet"),
			Chain::Gnosis => Some("xdai"),
			Chain::Arbitrum => Some("arbitrum_one"),
			Chain::Base => Some("base"),
			Chain::Sepolia => Some("sepolia"),
			_ => None,
		}
	}

	fn api_url(&self, chain: Chain, path: &str) -> ProviderResult<String> {
		let network = Self::network_name(chain).ok_or_else(|| ProviderError::ChainNotSupported {
			chain,
			provider_id: self.id().to_string(),
		})?;
		Ok(format!(
			"{}/{}/api/v1/{}",
			self.config.base_url.trim_end_matches('/'),
			network,
			path
		))
	}

	fn client(&self) -> ProviderResult<Arc<reqwest::Client>> {
		let client_config =
			ClientConfig::new(self.id(), &self.config.base_url, self.config.timeout_ms);
		self.cache.get_client(&client_config)
	}

	fn build_quote_request(&self, request: &QuoteRequest) -> CowQuoteRequest {
		CowQuoteRequest {
			sell_token: request.input_token,
			buy_token: request.output_token,
			receiver: request.receiver_or_user(),
			from: request.user_address,
			kind: OrderKind::Sell,
			sell_amount_before_fee: request.input_amount.to_string(),
			app_data: self.config.app_data,
			partially_fillable: false,
			signing_scheme: "eip712".to_string(),
		}
	}

	/// Convert a CoW quote into a gasless off-chain-order quote
	pub fn convert_cow_quote(
		&self,
		response: CowQuoteResponse,
		request: &QuoteRequest,
	) -> ProviderResult<Quote> {
		let params = &response.quote;
		let sell_amount = parse_amount("sellAmount", &params.sell_amount)?;
		let fee_amount = parse_amount("feeAmount", &params.fee_amount)?;
		let buy_amount = parse_amount("buyAmount", &params.buy_amount)?;
		let slippage = request.slippage_or_default();

		let expires_at = response
			.expiration
			.as_deref()
			.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
			.map(|parsed| parsed.with_timezone(&Utc))
			.unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_QUOTE_EXPIRY_SECONDS));

		// Orders must be signed with a zero fee; the quoted fee is folded into the sell amount
		let order = SignableOrder {
			owner: request.user_address,
			sell_token: params.sell_token,
			buy_token: params.buy_token,
			receiver: params.receiver.unwrap_or_else(|| request.receiver_or_user()),
			sell_amount: sell_amount.saturating_add(fee_amount),
			buy_amount: apply_slippage(buy_amount, slippage),
			fee_amount: U256::ZERO,
			valid_to: params.valid_to,
			app_data: self.config.app_data,
			kind: OrderKind::Sell,
			partially_fillable: params.partially_fillable,
		};

		Ok(Quote {
			aggregator: self.id().to_string(),
			chain: request.chain,
			input_token: TokenInfo::resolve(request.chain, request.input_token),
			output_token: TokenInfo::resolve(request.chain, request.output_token),
			input_amount: request.input_amount,
			output_amount: buy_amount,
			price_impact: 0.0,
			estimated_gas: 0,
			estimated_gas_usd: 0.0,
			allowance_target: Some(GPV2_VAULT_RELAYER),
			expires_at,
			slippage,
			metadata: QuoteMetadata::OffChainOrder(OffChainOrder {
				provider_quote_id: response.id.map(|id| id.to_string()),
				order,
			}),
		})
	}

	/// Map an order book status string onto the order lifecycle
	pub fn map_order_status(status: &str) -> Option<OrderStatus> {
		match status {
			"presignaturePending" => Some(OrderStatus::Created),
			"open" => Some(OrderStatus::Pending),
			"fulfilled" => Some(OrderStatus::Fulfilled),
			"cancelled" => Some(OrderStatus::Cancelled),
			"expired" => Some(OrderStatus::Expired),
			_ => None,
		}
	}

	async fn settlement_tx_hash(&self, chain: Chain, uid: &str) -> ProviderResult<Option<B256>> {
		let url = self.api_url(chain, "trades")?;
		let response = self
			.client()?
			.get(&url)
			.query(&[("orderUid", uid)])
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(ProviderError::from_http_failure(response.status().as_u16()));
		}

		let trades: Vec<CowTrade> =
			response
				.json()
				.await
				.map_err(|e| ProviderError::InvalidResponse {
					reason: format!("Failed to parse CoW trades response: {}", e),
				})?;
		Ok(trades.into_iter().find_map(|trade| trade.tx_hash))
	}
}

fn parse_amount(field: &str, raw: &str) -> ProviderResult<U256> {
	U256::from_str_radix(raw, 10).map_err(|e| ProviderError::InvalidResponse {
		reason: format!("Invalid {} '{}': {}", field, raw, e),
	})
}

async fn read_api_error(response: reqwest::Response) -> ProviderError {
	let status = response.status().as_u16();
	match response.json::<CowApiError>().await {
		Ok(api_error) => ProviderError::ProviderRejected {
			code: api_error.error_type,
			message: api_error.description,
		},
		Err(_) => ProviderError::from_http_failure(status),
	}
}

#[async_trait]
impl QuoteProvider for CowSwapAdapter {
	fn provider_info(&self) -> &Provider {
		&self.info
	}

	async fn get_quote(&self, request: &QuoteRequest) -> ProviderResult<Option<Quote>> {
		if is_native_token(&request.input_token) {
			debug!("CoW Swap cannot sell the native token directly, skipping");
			return Ok(None);
		}

		let url = self.api_url(request.chain, "quote")?;
		let body = self.build_quote_request(request);

		debug!(
			"Fetching CoW Swap quote from {} - {} -> {} amount {}",
			url, request.input_token, request.output_token, request.input_amount
		);

		let response = self.client()?.post(&url).json(&body).send().await?;
		let status = response.status();

		if status.is_client_error() {
			return match read_api_error(response).await {
				ProviderError::ProviderRejected { code, message }
					if NO_ROUTE_ERRORS.contains(&code.as_str()) =>
				{
					debug!("CoW Swap has no route: {} - {}", code, message);
					Ok(None)
				},
				err => Err(err),
			};
		}
		if !status.is_success() {
			return Err(ProviderError::from_http_failure(status.as_u16()));
		}

		let cow_quote: CowQuoteResponse =
			response
				.json()
				.await
				.map_err(|e| ProviderError::InvalidResponse {
					reason: format!("Failed to parse CoW quote response: {}", e),
				})?;

		self.convert_cow_quote(cow_quote, request).map(Some)
	}

	async fn create_order(
		&self,
		quote: &Quote,
		signature: &OrderSignature,
	) -> ProviderResult<Option<String>> {
		let QuoteMetadata::OffChainOrder(off_chain) = &quote.metadata else {
			return Err(ProviderError::unsupported("create_order for on-chain quote", self.id()));
		};
		let order = &off_chain.order;

		let body = CowOrderCreation {
			sell_token: order.sell_token,
			buy_token: order.buy_token,
			receiver: order.receiver,
			sell_amount: order.sell_amount.to_string(),
			buy_amount: order.buy_amount.to_string(),
			valid_to: order.valid_to,
			fee_amount: order.fee_amount.to_string(),
			kind: order.kind,
			partially_fillable: order.partially_fillable,
			app_data: order.app_data,
			signing_scheme: signature.scheme.as_str(),
			signature: signature.signature.to_string(),
			from: order.owner,
			quote_id: off_chain
				.provider_quote_id
				.as_deref()
				.and_then(|id| id.parse().ok()),
		};

		let url = self.api_url(quote.chain, "orders")?;
		let response = self.client()?.post(&url).json(&body).send().await?;

		if !response.status().is_success() {
			let err = read_api_error(response).await;
			warn!("CoW Swap rejected order: {}", err);
			return Err(err);
		}

		let uid: String = response
			.json()
			.await
			.map_err(|e| ProviderError::InvalidResponse {
				reason: format!("Failed to parse CoW order uid: {}", e),
			})?;
		debug!("CoW Swap accepted order {}", uid);
		Ok(Some(uid))
	}

	async fn get_order_status(
		&self,
		chain: Chain,
		order_id: &str,
	) -> ProviderResult<Option<OrderStatusResponse>> {
		let url = self.api_url(chain, &format!("orders/{}", order_id))?;
		let response = self.client()?.get(&url).send().await?;

		if response.status() == StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !response.status().is_success() {
			return Err(ProviderError::from_http_failure(response.status().as_u16()));
		}

		let order: CowOrder = response
			.json()
			.await
			.map_err(|e| ProviderError::InvalidResponse {
				reason: format!("Failed to parse CoW order: {}", e),
			})?;

		let status =
			Self::map_order_status(&order.status).ok_or_else(|| ProviderError::InvalidResponse {
				reason: format!("Unknown CoW order status '{}'", order.status),
			})?;

		let tx_hash = if status == OrderStatus::Fulfilled {
			self.settlement_tx_hash(chain, &order.uid).await?
		} else {
			None
		};

		Ok(Some(OrderStatusResponse {
			order_id: order.uid,
			status,
			filled_amount: order
				.executed_sell_amount
				.as_deref()
				.and_then(|raw| U256::from_str_radix(raw, 10).ok())
				.filter(|amount| !amount.is_zero()),
			tx_hash,
		}))
	}
}
