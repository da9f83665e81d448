//! Swap Service
//!
//! Quote optimization, dust routing, batch fetching, calldata building and
//! order tracking on top of a provider registry.

pub mod batch;
pub mod calldata;
pub mod dust;
pub mod gas;
pub mod optimizer;
pub mod order;

#[cfg(test)]
mod test_support;

pub use batch::{BatchQuoteFetcher, BatchQuoteOptions, TokenAmount};
pub use calldata::{encode_approve, encode_deposit, CalldataBuilder, CalldataError, CalldataResult};
pub use dust::{DustRouter, DustTier};
pub use gas::{ChainGasPrice, CostNormalizer, GasPriceSource, StaticGasPriceTable, CONSERVATIVE_GAS_PRICE};
pub use optimizer::{OptimizerError, OptimizerResult, QuoteOptimizer, QuoteOptions};
pub use order::{OrderService, OrderServiceError, OrderServiceResult};
