//! Configuration loading utilities

use crate::settings::ConfigValidationError;
use crate::Settings;
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Prefix for environment overrides, e.g. `SWAP_ROUTER__BATCH__WINDOW_SIZE=10`
pub const ENV_PREFIX: &str = "SWAP_ROUTER";

pub const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("failed to load configuration: {0}")]
	Config(#[from] ConfigError),
	#[error("invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load settings from the default config file (if present) and the environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from(DEFAULT_CONFIG_PATH)
}

/// Load settings from `path` (any format the config crate recognises, extension optional)
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let settings: Settings = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.separator("__")
				.try_parsing(true),
		)
		.build()?
		.try_deserialize()?;

	settings.validate()?;
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_missing_file_yields_defaults() {
		let settings = load_config_from("does/not/exist").unwrap();
		assert_eq!(settings.batch.window_size, 5);
	}

	#[test]
	fn test_file_overrides_defaults() {
		let path = std::env::temp_dir().join(format!("swap-router-{}.json", std::process::id()));
		let mut file = std::fs::File::create(&path).unwrap();
		write!(
			file,
			r#"{{ "timeouts": {{ "per_provider_ms": 2500 }}, "providers": {{ "cowswap": {{ "enabled": false }} }} }}"#
		)
		.unwrap();

		let settings = load_config_from(path.to_str().unwrap()).unwrap();
		assert_eq!(settings.timeouts.per_provider_ms, 2500);
		assert!(!settings.providers.cowswap.enabled);
		assert_eq!(settings.providers.cowswap.base_url, "https://api.cow.fi");

		std::fs::remove_file(path).unwrap();
	}

	#[test]
	fn test_invalid_file_values_rejected() {
		let path = std::env::temp_dir().join(format!("swap-router-bad-{}.json", std::process::id()));
		std::fs::write(&path, r#"{ "batch": { "window_size": 0 } }"#).unwrap();

		let err = load_config_from(path.to_str().unwrap()).unwrap_err();
		assert!(matches!(err, ConfigLoadError::Validation(_)));

		std::fs::remove_file(path).unwrap();
	}
}
