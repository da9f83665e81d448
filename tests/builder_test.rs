//! Engine wiring tests

mod mocks;

use std::sync::Arc;

use alloy_primitives::U256;
use swap_router::adapters::COWSWAP_PROVIDER_ID;
use swap_router::config::{DustTierSettings, GasPriceSettings};
use swap_router::models::{Capability, Chain, QuoteRequest};
use swap_router::{BuildError, Settings, SwapRouterBuilder};

use crate::mocks::{mock_builder, usdc_to_weth_request, MockProvider, BASE_USDC, BASE_WETH, USER};

#[test]
fn test_default_settings_register_cowswap() {
	let engine = SwapRouterBuilder::from_settings(Settings::default())
		.unwrap()
		.build()
		.unwrap();

	assert_eq!(engine.registry().ids(), vec![COWSWAP_PROVIDER_ID.to_string()]);
	assert!(engine.is_chain_supported(Chain::Base));
	assert!(engine.is_chain_supported(Chain::Gnosis));
	assert!(!engine.is_chain_supported(Chain::Polygon));
}

#[test]
fn test_custom_providers_follow_builtin_ones() {
	let engine = SwapRouterBuilder::from_settings(Settings::default())
		.unwrap()
		.with_provider(Arc::new(MockProvider::on_chain("aggregator-a", 1)))
		.build()
		.unwrap();

	assert_eq!(
		engine.get_available_aggregators(Chain::Base),
		vec![COWSWAP_PROVIDER_ID.to_string(), "aggregator-a".to_string()]
	);
	assert!(engine.is_chain_supported(Chain::Arbitrum));
}

#[test]
fn test_empty_registry_is_rejected() {
	assert!(matches!(
		SwapRouterBuilder::new().build(),
		Err(BuildError::NoProviders)
	));
}

#[test]
fn test_duplicate_provider_ids_are_rejected() {
	let result = mock_builder()
		.with_provider(Arc::new(MockProvider::on_chain("aggregator-a", 1)))
		.with_provider(Arc::new(MockProvider::on_chain("aggregator-a", 2)))
		.build();

	assert!(matches!(result, Err(BuildError::Registry(_))));
}

#[test]
fn test_invalid_settings_are_rejected() {
	let mut settings = Settings::default();
	settings.batch.window_size = 0;
	assert!(matches!(
		SwapRouterBuilder::from_settings(settings),
		Err(BuildError::InvalidSettings(_))
	));

	let mut settings = Settings::default();
	settings.providers.cowswap.app_data = Some("not-a-hash".to_string());
	assert!(matches!(
		SwapRouterBuilder::from_settings(settings),
		Err(BuildError::InvalidAppData { .. })
	));
}

#[test]
fn test_settings_flow_into_default_options() {
	let mut settings = Settings::default();
	settings.providers.cowswap.enabled = false;
	settings.timeouts.per_provider_ms = 1_500;
	settings.batch.window_size = 3;
	settings.optimizer.max_price_impact_percent = 2.0;

	let engine = SwapRouterBuilder::from_settings(settings)
		.unwrap()
		.with_provider(Arc::new(MockProvider::on_chain("aggregator-a", 1)))
		.build()
		.unwrap();

	let options = engine.quote_options();
	assert_eq!(options.timeout.as_millis(), 1_500);
	assert_eq!(options.max_price_impact, 2.0);
	assert_eq!(engine.batch_options().window_size, 3);
}

#[tokio::test]
async fn test_gas_overrides_change_ranking() {
	// 1 WETH -> USDC; outputs in USDC base units
	let request = QuoteRequest::new(
		Chain::Base,
		BASE_WETH,
		BASE_USDC,
		U256::from(1_000_000_000_000_000_000u128),
		USER,
	);
	let providers = || {
		(
			Arc::new(MockProvider::on_chain("aggregator-a", 1_000_000_000)),
			Arc::new(MockProvider::gasless("cow", 900_000_000)),
		)
	};

	let (on_chain, gasless) = providers();
	let cheap_gas = mock_builder()
		.with_provider(on_chain)
		.with_provider(gasless)
		.build()
		.unwrap();
	let best = cheap_gas
		.get_best_quote(&request, &cheap_gas.quote_options())
		.await
		.unwrap()
		.best;
	assert_eq!(best.aggregator, "aggregator-a");

	let mut settings = Settings::default();
	settings.providers.cowswap.enabled = false;
	settings.gas.chains.insert(
		Chain::Base,
		GasPriceSettings {
			gas_price_gwei: 1_000.0,
			native_price_usd: 3_000.0,
		},
	);
	let (on_chain, gasless) = providers();
	let expensive_gas = SwapRouterBuilder::from_settings(settings)
		.unwrap()
		.with_provider(on_chain)
		.with_provider(gasless)
		.build()
		.unwrap();
	let comparison = expensive_gas
		.get_best_quote(&request, &expensive_gas.quote_options())
		.await
		.unwrap();

	assert_eq!(comparison.best.aggregator, "cow");
	// 150k gas at 1000 gwei and $3000 per ETH
	assert!((comparison.all[1].estimated_gas_usd - 450.0).abs() < 1e-6);
	assert!(comparison.savings.vs_worst_usd > 0.0);
}

#[tokio::test]
async fn test_configured_dust_tiers_are_used() {
	let mut settings = Settings::default();
	settings.providers.cowswap.enabled = false;
	settings.dust.tiers = vec![DustTierSettings {
		max_amount_usd: 100.0,
		capabilities: vec![Capability::Gasless],
	}];

	let on_chain = Arc::new(MockProvider::on_chain("aggregator-a", 600_000_000_000_000));
	let gasless = Arc::new(MockProvider::gasless("cow", 400_000_000_000_000));
	let engine = SwapRouterBuilder::from_settings(settings)
		.unwrap()
		.with_provider(on_chain.clone())
		.with_provider(gasless.clone())
		.build()
		.unwrap();

	let quote = engine
		.get_dust_quote(&usdc_to_weth_request(), 60.0)
		.await
		.unwrap();

	assert_eq!(quote.aggregator, "cow");
	assert_eq!(on_chain.call_count(), 0);
}

#[test]
fn test_engine_from_config_files() {
	let engine = SwapRouterBuilder::from_config().unwrap().build().unwrap();
	assert!(!engine.registry().is_empty());
}
