//! Token descriptors and native-token handling

use std::collections::HashMap;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use super::Chain;

/// Sentinel address conventionally used by aggregators for the chain's native token
pub const NATIVE_TOKEN_ADDRESS: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Decimals assumed when a token is not in the registry
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Symbol reported for tokens missing from the registry
pub const UNKNOWN_TOKEN_SYMBOL: &str = "UNKNOWN";

/// Whether the address denotes the chain's native token (sentinel or zero address)
pub fn is_native_token(token: &Address) -> bool {
	*token == NATIVE_TOKEN_ADDRESS || token.is_zero()
}

/// Resolved token descriptor attached to quotes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
	pub address: Address,
	pub symbol: String,
	pub decimals: u8,
}

impl TokenInfo {
	pub fn new(address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
		Self {
			address,
			symbol: symbol.into(),
			decimals,
		}
	}

	/// Resolve a descriptor from the static registry, falling back to `UNKNOWN`/18
	pub fn resolve(chain: Chain, token: Address) -> Self {
		if is_native_token(&token) {
			return Self::new(token, chain.native_symbol(), 18);
		}

		if token == chain.wrapped_native() {
			return Self::new(token, format!("W{}", chain.native_symbol()), 18);
		}

		match KNOWN_TOKENS.get(&(chain, token)) {
			Some((symbol, decimals)) => Self::new(token, *symbol, *decimals),
			None => Self::new(token, UNKNOWN_TOKEN_SYMBOL, DEFAULT_TOKEN_DECIMALS),
		}
	}

	pub fn is_native(&self) -> bool {
		is_native_token(&self.address)
	}
}

lazy_static::lazy_static! {
	static ref KNOWN_TOKENS: HashMap<(Chain, Address), (&'static str, u8)> = {
		let mut tokens = HashMap::new();

		tokens.insert((Chain::Ethereum, address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")), ("USDC", 6));
		tokens.insert((Chain::Ethereum, address!("dAC17F958D2ee523a2206206994597C13D831ec7")), ("USDT", 6));
		tokens.insert((Chain::Ethereum, address!("6B175474E89094C44Da98b954EedeAC495271d0F")), ("DAI", 18));

		tokens.insert((Chain::Base, address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")), ("USDC", 6));
		tokens.insert((Chain::Base, address!("50c5725949A6F0c72E6C4a641F24049A917DB0Cb")), ("DAI", 18));

		tokens.insert((Chain::Arbitrum, address!("af88d065e77c8cC2239327C5EDb3A432268e5831")), ("USDC", 6));
		tokens.insert((Chain::Arbitrum, address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9")), ("USDT", 6));

		tokens.insert((Chain::Optimism, address!("0b2C639c533813f4Aa9D7837CAf62653d097Ff85")), ("USDC", 6));

		tokens.insert((Chain::Polygon, address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359")), ("USDC", 6));
		tokens.insert((Chain::Polygon, address!("c2132D05D31c914a87C6611C10748AEb04B58e8F")), ("USDT", 6));

		// Binance-peg stables use 18 decimals
		tokens.insert((Chain::Bsc, address!("8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d")), ("USDC", 18));
		tokens.insert((Chain::Bsc, address!("55d398326f99059fF775485246999027B3197955")), ("USDT", 18));

		tokens.insert((Chain::Linea, address!("176211869cA2b568f2A7D4EE941E073a821EE1ff")), ("USDC", 6));
		tokens.insert((Chain::Avalanche, address!("B97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E")), ("USDC", 6));
		tokens.insert((Chain::Gnosis, address!("DDAfbb505ad214D7b80b1f830fcCc89B60fb7A83")), ("USDC", 6));

		tokens
	};
}
