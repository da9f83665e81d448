//! Error types for provider operations

use thiserror::Error;

use crate::models::Chain;

/// Failure reported by a single provider call
///
/// The optimizer absorbs these per provider; they only reach callers through
/// single-provider operations such as calldata building or order submission.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Provider returned error: {code} - {message}")]
	ProviderRejected { code: String, message: String },

	#[error("Unsupported operation: {operation} for provider {provider_id}")]
	UnsupportedOperation {
		operation: String,
		provider_id: String,
	},

	#[error("Chain not supported: {chain} by provider {provider_id}")]
	ChainNotSupported { chain: Chain, provider_id: String },
}

impl ProviderError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ProviderError::HttpStatusError { status_code, .. } => Some(*status_code),
			ProviderError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			reason: reason.into(),
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			404 => "Not Found".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}

	pub fn unsupported(operation: &str, provider_id: &str) -> Self {
		Self::UnsupportedOperation {
			operation: operation.to_string(),
			provider_id: provider_id.to_string(),
		}
	}
}
