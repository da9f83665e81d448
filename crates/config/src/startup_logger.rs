//! Startup logging for the swap router engine

use std::env;
use tracing::info;

use crate::Settings;

/// Logs engine and environment information at startup
pub fn log_service_info() {
	let service_name = "swap-router";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Swap Router Engine Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the effective routing settings
pub fn log_settings(settings: &Settings) {
	info!(
		"⏱️ Provider timeout: {}ms, batch window: {}",
		settings.timeouts.per_provider_ms, settings.batch.window_size
	);
	info!(
		"🪙 Dust tiers: {}",
		settings
			.dust
			.tiers
			.iter()
			.map(|tier| format!("<${} {:?}", tier.max_amount_usd, tier.capabilities))
			.collect::<Vec<_>>()
			.join(", ")
	);
	if !settings.gas.chains.is_empty() {
		info!("⛽ Gas price overrides for {} chain(s)", settings.gas.chains.len());
	}
}

/// Logs engine readiness with the registered providers
pub fn log_engine_ready(provider_ids: &[String]) {
	info!("✅ Swap Router Engine Ready");
	info!("📡 Providers: {}", provider_ids.join(", "));
}
