use std::sync::Once;

use serde::Deserialize;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "madeira_engine=debug,wgpu=warn").
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,

    /// Forces ANSI colors on (`true`) or off (`false`); automatic when unset.
    pub color: Option<bool>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (&config.env_filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder.filter_level(log::LevelFilter::Info);
                // wgpu is chatty at info.
                builder.filter_module("wgpu_core", log::LevelFilter::Warn);
                builder.filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }

        builder.write_style(match config.color {
            Some(true) => env_logger::WriteStyle::Always,
            Some(false) => env_logger::WriteStyle::Never,
            None => env_logger::WriteStyle::Auto,
        });
        builder.format_timestamp_secs();

        // A logger installed by the embedder wins.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
