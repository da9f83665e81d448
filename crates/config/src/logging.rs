//! Tracing subscriber setup

use crate::settings::{LogFormat, LoggingSettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber described by `settings`.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false` when a
/// subscriber was already installed, which is expected in tests and embedders.
pub fn init_tracing(settings: &LoggingSettings) -> bool {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

	let result = match settings.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt().pretty().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt().compact().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
	};

	result.is_ok()
}
