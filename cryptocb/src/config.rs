//! Registry configuration.

use std::env::VarError;

use crate::error::{Error, Result};

/// Default number of device slots.
pub const DEFAULT_MAX_DEVICES: usize = 8;

/// Environment variable overriding the slot count of the global registry.
pub const MAX_DEVICES_ENV: &str = "CRYPTOCB_MAX_DEVICES";

/// Registry configuration.
///
/// # Example
///
/// ```rust
/// use cryptocb::RegistryConfig;
///
/// let config = RegistryConfig::builder()
///     .with_max_devices(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_devices(), 4);
/// ```
///
/// A configuration comes from `Default` or the builder, so a zero slot count
/// cannot be written directly:
///
/// ```rust,compile_fail
/// let config = cryptocb::RegistryConfig { max_devices: 0 };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    max_devices: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_devices: DEFAULT_MAX_DEVICES,
        }
    }
}

impl RegistryConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Number of device slots (default: 8).
    pub fn max_devices(&self) -> usize {
        self.max_devices
    }

    /// Configuration from the environment.
    ///
    /// Reads [`MAX_DEVICES_ENV`]; a missing variable yields the defaults and a
    /// malformed one is logged and ignored.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_DEVICES_ENV))
    }

    fn from_env_value(value: std::result::Result<String, VarError>) -> Self {
        match value {
            Ok(raw) => match Self::parse_max_devices(&raw) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring {}={:?}: {}", MAX_DEVICES_ENV, raw, e);
                    Self::default()
                },
            },
            Err(VarError::NotPresent) => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", MAX_DEVICES_ENV, e);
                Self::default()
            },
        }
    }

    fn parse_max_devices(raw: &str) -> Result<Self> {
        let max_devices = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| Error::InvalidConfig(format!("max devices: {}", e)))?;
        Self::builder().with_max_devices(max_devices).build()
    }
}

/// Builder for [`RegistryConfig`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: RegistryConfig,
}

impl ConfigBuilder {
    /// Set the number of device slots.
    pub fn with_max_devices(mut self, max_devices: usize) -> Self {
        self.config.max_devices = max_devices;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<RegistryConfig> {
        if self.config.max_devices == 0 {
            return Err(Error::InvalidConfig(
                "Registry needs at least one device slot".into(),
            ));
        }

        Ok(self.config)
    }
}
