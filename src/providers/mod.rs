//! Placeholder image services and the URL grammar each one speaks.

pub mod dummy_image;
pub mod lorem_flickr;

use serde::Deserialize;

use crate::error::ImageError;
use crate::options::Options;

pub use dummy_image::DummyImage;
pub use lorem_flickr::LoremFlickr;

/// Extensions every service can render.
pub const EXTENSIONS: &[&str] = &["jpg", "gif", "png"];

/// Extension used for saved files when the caller does not pick one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Supported placeholder services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// dummyimage.com: solid color block with optional text.
    DummyImage,
    /// loremflickr.com: keyword-filtered photos.
    LoremFlickr,
}

impl Service {
    /// Short name used on the command line and in config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DummyImage => "dummyimage",
            Self::LoremFlickr => "loremflickr",
        }
    }

    /// Look a service up by its short name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name doesn't match a known service.
    pub fn from_name(name: &str) -> Result<Self, ImageError> {
        match name {
            "dummyimage" => Ok(Self::DummyImage),
            "loremflickr" => Ok(Self::LoremFlickr),
            _ => Err(ImageError::InvalidArgument(format!(
                "Unknown service '{name}'. Expected 'dummyimage' or 'loremflickr'."
            ))),
        }
    }
}

/// Per-service settings, fixed once a provider is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Maximum `width * height`; `None` means unlimited.
    pub max_resolution: Option<u64>,
    /// Extensions the service can render.
    pub extensions: &'static [&'static str],
    /// Color filters the service understands (empty when unsupported).
    pub filters: &'static [&'static str],
}

impl ServiceConfig {
    /// Apply user overrides on top of the service defaults.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ServiceOverrides) -> Self {
        if let Some(ref base_url) = overrides.base_url {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        match overrides.max_resolution {
            Some(0) => self.max_resolution = None,
            Some(limit) => self.max_resolution = Some(limit),
            None => {}
        }
        self
    }
}

/// Optional replacements for a service's base URL and resolution ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceOverrides {
    /// Replacement base URL (e.g. a local mirror).
    pub base_url: Option<String>,
    /// Replacement ceiling; `0` removes the limit.
    pub max_resolution: Option<u64>,
}

/// Builds image URLs for one placeholder service.
pub trait ImageUrlProvider: Send + Sync {
    /// Which service this provider targets.
    fn service(&self) -> Service;

    /// The provider's immutable configuration.
    fn config(&self) -> &ServiceConfig;

    /// Build the URL for a `width` x `height` image styled by `options`.
    /// Unrecognized option keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] or [`ImageError::OutOfBounds`]
    /// when the inputs fail validation.
    fn url_for(&self, width: i64, height: i64, options: &Options) -> Result<String, ImageError>;
}

/// Create the provider for `service` with the given overrides applied.
#[must_use]
pub fn provider_for(service: Service, overrides: &ServiceOverrides) -> Box<dyn ImageUrlProvider> {
    match service {
        Service::DummyImage => Box::new(DummyImage::with_overrides(overrides)),
        Service::LoremFlickr => Box::new(LoremFlickr::with_overrides(overrides)),
    }
}
