//! Configuration file loading and logging setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::log::LevelFilter;

use crate::error::ImageError;
use crate::providers::{Service, ServiceOverrides};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Overrides for dummyimage.com.
    #[serde(default)]
    pub dummyimage: ServiceOverrides,

    /// Overrides for loremflickr.com.
    #[serde(default)]
    pub loremflickr: ServiceOverrides,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ImageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ImageError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            ImageError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Overrides for the given service.
    #[must_use]
    pub fn overrides(&self, service: Service) -> &ServiceOverrides {
        match service {
            Service::DummyImage => &self.dummyimage,
            Service::LoremFlickr => &self.loremflickr,
        }
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PLACEHOLDER_CONFIG` environment variable
/// 3. `~/.config/placeholder/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("PLACEHOLDER_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/placeholder/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/placeholder/config.toml")
    } else {
        PathBuf::from("placeholder.toml")
    }
}

/// Sets up logging based on the verbose flag.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn setup_logging(verbose: bool) -> Result<(), ImageError> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !verbose {
        logger = logger
            .with_module_level("reqwest", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Warn)
            .with_module_level("hyper_util", LevelFilter::Warn);
    }
    logger.init().map_err(|err| ImageError::Config(format!("Failed to initialize logger: {err}")))
}
