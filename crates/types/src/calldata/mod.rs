//! Executable transaction payloads
//!
//! Calldata is produced fresh on every build call and never cached, since it
//! embeds amounts and allowances that go stale with the quote.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::models::Chain;

/// A single swap transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCalldata {
	pub to: Address,
	pub data: Bytes,
	/// Native value to attach
	pub value: U256,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
	Approve,
	Wrap,
	Swap,
}

/// One call in an ordered execution sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStep {
	pub kind: StepKind,
	pub to: Address,
	pub data: Bytes,
	pub value: U256,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<u64>,
}

impl From<SwapCalldata> for CallStep {
	fn from(calldata: SwapCalldata) -> Self {
		Self {
			kind: StepKind::Swap,
			to: calldata.to,
			data: calldata.data,
			value: calldata.value,
			gas_limit: calldata.gas_limit,
		}
	}
}

/// Ordered call sequence `[wrap?] [approve?] swap` for one quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSwapCalldata {
	pub chain: Chain,
	/// Token the sequence spends
	pub input_token: Address,
	pub steps: Vec<CallStep>,
}

impl BatchSwapCalldata {
	pub fn first_step(&self) -> Option<&CallStep> {
		self.steps.first()
	}

	pub fn swap_step(&self) -> Option<&CallStep> {
		self.steps.last().filter(|step| step.kind == StepKind::Swap)
	}

	pub fn has_step(&self, kind: StepKind) -> bool {
		self.steps.iter().any(|step| step.kind == kind)
	}

	/// Total native value attached across all steps
	pub fn total_value(&self) -> U256 {
		self.steps
			.iter()
			.fold(U256::ZERO, |acc, step| acc.saturating_add(step.value))
	}
}
