//! Swap Router Configuration
//!
//! Settings, loading and logging setup for the quote aggregation engine.

pub mod loader;
pub mod logging;
pub mod settings;
pub mod startup_logger;

pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use logging::init_tracing;
pub use settings::{
	BatchSettings, ConfigValidationError, CowSwapSettings, DustSettings, DustTierSettings,
	GasPriceSettings, GasSettings, LogFormat, LoggingSettings, OptimizerSettings,
	ProviderSettings, Settings, TimeoutSettings,
};
pub use startup_logger::{log_engine_ready, log_service_info, log_settings};
