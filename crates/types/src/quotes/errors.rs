//! Error types for quote operations

use alloy_primitives::Address;
use thiserror::Error;

/// Validation errors for quote requests
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteValidationError {
	#[error("Invalid amount: {field} - {reason}")]
	InvalidAmount { field: String, reason: String },

	#[error("Input and output token are identical: {token}")]
	IdenticalTokens { token: Address },

	#[error("Invalid slippage tolerance: {value} (must be between 0 and {max} percent)")]
	InvalidSlippageTolerance { value: f64, max: f64 },

	#[error("Invalid quote options: {field} - {reason}")]
	InvalidQuoteOptions { field: String, reason: String },
}
