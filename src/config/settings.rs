use serde::Deserialize;

use crate::transport::TransportConfig;

/// Top-level configuration settings for an application embedding the bridge.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub transport: TransportConfig,
}

/// Configuration settings for logging.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default level handed to `utils::logging::init`.
    pub level: String,
}

impl Settings {
    pub fn transport_config(&self) -> TransportConfig {
        self.transport.clone()
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub logging: Option<PartialLoggingSettings>,
    pub transport: Option<PartialTransportSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialTransportSettings {
    pub channel_capacity: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}
