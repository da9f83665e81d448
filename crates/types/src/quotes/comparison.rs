//! Ranked result of a quote aggregation

use serde::{Deserialize, Serialize};

use super::Quote;

/// Outcome of a successful aggregation
///
/// `all` is ordered by net value, best first, and `best` is always `all[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteComparison {
	pub best: Quote,
	pub all: Vec<Quote>,
	pub savings: QuoteSavings,
	/// Set when no quote met the caller's criteria and the unfiltered set was ranked
	pub criteria_relaxed: bool,
	/// Output price used to compute net values
	pub output_price_usd: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSavings {
	pub vs_worst_usd: f64,
	pub vs_average_usd: f64,
}

impl QuoteComparison {
	/// Build a comparison from quotes already sorted best first.
	///
	/// Returns `None` for an empty list.
	pub fn from_ranked(ranked: Vec<Quote>, output_price_usd: f64, criteria_relaxed: bool) -> Option<Self> {
		let best = ranked.first()?.clone();
		let values: Vec<f64> = ranked
			.iter()
			.map(|quote| quote.net_value(output_price_usd))
			.collect();

		let best_value = values[0];
		let worst_value = values.iter().copied().fold(f64::INFINITY, f64::min);
		let average_value = values.iter().sum::<f64>() / values.len() as f64;

		Some(Self {
			best,
			all: ranked,
			savings: QuoteSavings {
				vs_worst_usd: best_value - worst_value,
				vs_average_usd: best_value - average_value,
			},
			criteria_relaxed,
			output_price_usd,
		})
	}

	pub fn len(&self) -> usize {
		self.all.len()
	}

	pub fn is_empty(&self) -> bool {
		self.all.is_empty()
	}
}
