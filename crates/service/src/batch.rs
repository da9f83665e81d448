//! Batch quote fetching
//!
//! Quotes many input tokens into one output token. Tokens are processed in
//! fixed-size windows: concurrently within a window, windows one after
//! another, which bounds in-flight comparisons to the window size.

use alloy_primitives::{Address, U256};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use swap_types::constants::limits::DEFAULT_BATCH_WINDOW_SIZE;
use swap_types::{Chain, Quote, QuoteRequest};
use tracing::{debug, info, warn};

use crate::optimizer::{QuoteOptimizer, QuoteOptions};

/// One input token and the amount to sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
	pub token: Address,
	pub amount: U256,
}

impl TokenAmount {
	pub fn new(token: Address, amount: U256) -> Self {
		Self { token, amount }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchQuoteOptions {
	pub window_size: usize,
	pub slippage: Option<f64>,
	pub exclude_aggregators: Vec<String>,
	pub quote_options: QuoteOptions,
}

impl Default for BatchQuoteOptions {
	fn default() -> Self {
		Self {
			window_size: DEFAULT_BATCH_WINDOW_SIZE,
			slippage: None,
			exclude_aggregators: Vec::new(),
			quote_options: QuoteOptions::default(),
		}
	}
}

impl BatchQuoteOptions {
	pub fn with_window_size(mut self, window_size: usize) -> Self {
		self.window_size = window_size;
		self
	}

	pub fn with_slippage(mut self, slippage: f64) -> Self {
		self.slippage = Some(slippage);
		self
	}

	pub fn with_quote_options(mut self, quote_options: QuoteOptions) -> Self {
		self.quote_options = quote_options;
		self
	}
}

#[derive(Clone)]
pub struct BatchQuoteFetcher {
	optimizer: QuoteOptimizer,
}

impl BatchQuoteFetcher {
	pub fn new(optimizer: QuoteOptimizer) -> Self {
		Self { optimizer }
	}

	/// Best quote per input token; tokens without a winner are omitted
	pub async fn get_batch_quotes(
		&self,
		chain: Chain,
		tokens: &[TokenAmount],
		output_token: Address,
		user_address: Address,
		options: &BatchQuoteOptions,
	) -> HashMap<Address, Quote> {
		let window_size = options.window_size.max(1);
		let mut results = HashMap::with_capacity(tokens.len());

		info!(
			"Fetching batch quotes for {} tokens on {} (window {})",
			tokens.len(),
			chain,
			window_size
		);

		for (index, window) in tokens.chunks(window_size).enumerate() {
			debug!("Processing batch window {} ({} tokens)", index, window.len());

			let tasks = window.iter().map(|token_amount| {
				let mut request = QuoteRequest::new(
					chain,
					token_amount.token,
					output_token,
					token_amount.amount,
					user_address,
				)
				.excluding(options.exclude_aggregators.iter().cloned());
				request.slippage = options.slippage;

				let optimizer = self.optimizer.clone();
				let quote_options = options.quote_options.clone();
				tokio::spawn(async move {
					let outcome = optimizer.get_best_quote(&request, &quote_options).await;
					(request.input_token, outcome)
				})
			});

			for joined in join_all(tasks).await {
				match joined {
					Ok((token, Ok(comparison))) => {
						results.insert(token, comparison.best);
					},
					Ok((token, Err(e))) => {
						debug!("No batch quote for {}: {}", token, e);
					},
					Err(e) => {
						warn!("Batch quote task failed: {}", e);
					},
				}
			}
		}

		info!(
			"Batch quotes completed: {}/{} tokens quoted",
			results.len(),
			tokens.len()
		);
		results
	}
}
