mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{LoggingSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the logging and transport configurations
///
/// Environment variables use the `BRIDGE_` prefix and `__` between sections,
/// e.g. `BRIDGE_TRANSPORT__CHANNEL_CAPACITY=500`. A `.env` file is read first
/// when present.
pub fn load_config() -> Result<Settings, ConfigError> {
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("BRIDGE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
        transport: crate::transport::TransportConfig {
            channel_capacity: partial
                .transport
                .as_ref()
                .and_then(|t| t.channel_capacity)
                .unwrap_or(default.transport.channel_capacity),
        },
    })
}
