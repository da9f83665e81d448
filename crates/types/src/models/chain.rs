//! Supported EVM chains

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// EVM chain the engine can route swaps on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
	Ethereum,
	Base,
	Arbitrum,
	Optimism,
	Polygon,
	Bsc,
	Linea,
	Avalanche,
	Gnosis,
	Sepolia,
}

impl Chain {
	/// Every chain known to the engine, in a stable order
	pub const ALL: [Chain; 10] = [
		Chain::Ethereum,
		Chain::Base,
		Chain::Arbitrum,
		Chain::Optimism,
		Chain::Polygon,
		Chain::Bsc,
		Chain::Linea,
		Chain::Avalanche,
		Chain::Gnosis,
		Chain::Sepolia,
	];

	/// EIP-155 chain id
	pub fn chain_id(&self) -> u64 {
		match self {
			Chain::Ethereum => 1,
			Chain::Optimism => 10,
			Chain::Bsc => 56,
			Chain::Gnosis => 100,
			Chain::Polygon => 137,
			Chain::Base => 8453,
			Chain::Arbitrum => 42161,
			Chain::Avalanche => 43114,
			Chain::Linea => 59144,
			Chain::Sepolia => 11155111,
		}
	}

	/// Look up a chain by its EIP-155 id
	pub fn from_chain_id(chain_id: u64) -> Option<Self> {
		Self::ALL.into_iter().find(|chain| chain.chain_id() == chain_id)
	}

	/// Lowercase identifier used in configuration and logs
	pub fn as_str(&self) -> &'static str {
		match self {
			Chain::Ethereum => "ethereum",
			Chain::Base => "base",
			Chain::Arbitrum => "arbitrum",
			Chain::Optimism => "optimism",
			Chain::Polygon => "polygon",
			Chain::Bsc => "bsc",
			Chain::Linea => "linea",
			Chain::Avalanche => "avalanche",
			Chain::Gnosis => "gnosis",
			Chain::Sepolia => "sepolia",
		}
	}

	/// Symbol of the chain's gas token
	pub fn native_symbol(&self) -> &'static str {
		match self {
			Chain::Polygon => "POL",
			Chain::Bsc => "BNB",
			Chain::Avalanche => "AVAX",
			Chain::Gnosis => "XDAI",
			_ => "ETH",
		}
	}

	/// ERC-20 wrapper of the chain's native token
	pub fn wrapped_native(&self) -> Address {
		match self {
			Chain::Ethereum => address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
			Chain::Base | Chain::Optimism => address!("4200000000000000000000000000000000000006"),
			Chain::Arbitrum => address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
			Chain::Polygon => address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"),
			Chain::Bsc => address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c"),
			Chain::Linea => address!("e5D7C2a44FfDDf6b295A15c148167daaAf5Cf34f"),
			Chain::Avalanche => address!("B31f66AA3C1e785363F0875A1B74E27b85FD66c7"),
			Chain::Gnosis => address!("e91D153E0b41518A2Ce8Dd3D7944Fa863463a97d"),
			Chain::Sepolia => address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
		}
	}

	pub fn is_testnet(&self) -> bool {
		matches!(self, Chain::Sepolia)
	}
}

impl fmt::Display for Chain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a chain name or id is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chain: {0}")]
pub struct UnknownChainError(pub String);

impl FromStr for Chain {
	type Err = UnknownChainError;

	/// Accepts the lowercase name, a few common aliases or a numeric chain id
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized = value.trim().to_ascii_lowercase();
		if let Ok(chain_id) = normalized.parse::<u64>() {
			return Self::from_chain_id(chain_id).ok_or(UnknownChainError(value.to_string()));
		}

		match normalized.as_str() {
			"ethereum" | "mainnet" | "eth" => Ok(Chain::Ethereum),
			"base" => Ok(Chain::Base),
			"arbitrum" | "arbitrum_one" | "arb" => Ok(Chain::Arbitrum),
			"optimism" | "op" => Ok(Chain::Optimism),
			"polygon" | "matic" => Ok(Chain::Polygon),
			"bsc" | "bnb" => Ok(Chain::Bsc),
			"linea" => Ok(Chain::Linea),
			"avalanche" | "avax" => Ok(Chain::Avalanche),
			"gnosis" | "xdai" => Ok(Chain::Gnosis),
			"sepolia" => Ok(Chain::Sepolia),
			_ => Err(UnknownChainError(value.to_string())),
		}
	}
}
