//! Off-chain order lifecycle types

use alloy_primitives::{Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an off-chain order
///
/// `quoted -> created -> pending -> fulfilled | cancelled | expired`; a
/// created order may also jump straight to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Quote obtained, order not yet submitted
	Quoted,
	/// Accepted by the provider, awaiting signature or book entry
	Created,
	/// Live in the order book
	Pending,
	Fulfilled,
	Cancelled,
	Expired,
}

impl OrderStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			OrderStatus::Fulfilled | OrderStatus::Cancelled | OrderStatus::Expired
		)
	}

	/// Whether a tracked order may move from `self` to `next`.
	///
	/// Re-reporting the current state is always allowed.
	pub fn can_transition_to(&self, next: OrderStatus) -> bool {
		use OrderStatus::*;

		if *self == next {
			return true;
		}
		match self {
			Quoted => matches!(next, Created | Pending | Fulfilled | Cancelled | Expired),
			Created => matches!(next, Pending | Fulfilled | Cancelled | Expired),
			Pending => matches!(next, Fulfilled | Cancelled | Expired),
			Fulfilled | Cancelled | Expired => false,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Quoted => "quoted",
			OrderStatus::Created => "created",
			OrderStatus::Pending => "pending",
			OrderStatus::Fulfilled => "fulfilled",
			OrderStatus::Cancelled => "cancelled",
			OrderStatus::Expired => "expired",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Current state of an order as reported by its provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
	pub order_id: String,
	pub status: OrderStatus,
	/// Amount of the sell token executed so far
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filled_amount: Option<U256>,
	/// Settlement transaction, once known
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tx_hash: Option<B256>,
}

impl OrderStatusResponse {
	pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
		Self {
			order_id: order_id.into(),
			status,
			filled_amount: None,
			tx_hash: None,
		}
	}
}

/// Signature scheme used to authorise an off-chain order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningScheme {
	Eip712,
	EthSign,
	Eip1271,
	PreSign,
}

impl SigningScheme {
	pub fn as_str(&self) -> &'static str {
		match self {
			SigningScheme::Eip712 => "eip712",
			SigningScheme::EthSign => "ethsign",
			SigningScheme::Eip1271 => "eip1271",
			SigningScheme::PreSign => "presign",
		}
	}
}

/// User signature over a `SignableOrder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSignature {
	pub scheme: SigningScheme,
	pub signature: Bytes,
}

impl OrderSignature {
	pub fn new(scheme: SigningScheme, signature: impl Into<Bytes>) -> Self {
		Self {
			scheme,
			signature: signature.into(),
		}
	}
}
