//! loremflickr.com: `{base}[/{filter}]/{W}/{H}[/{keywords}[/all]]`.

use tracing::debug;

use super::{ImageUrlProvider, Service, ServiceConfig, ServiceOverrides, EXTENSIONS};
use crate::error::ImageError;
use crate::options::{OptionKey, Options};
use crate::validate::{validate_filter, validate_resolution};

/// Default service URL.
pub const BASE_URL: &str = "https://loremflickr.com";

/// The service errors out above this many pixels.
pub const MAX_IMAGE_RESOLUTION: u64 = 47_400_000;

/// Gray filter.
pub const FILTER_GRAY: &str = "g";
/// Red filter.
pub const FILTER_RED: &str = "red";
/// Green filter.
pub const FILTER_GREEN: &str = "green";
/// Blue filter.
pub const FILTER_BLUE: &str = "blue";

/// Filters the service understands.
pub const FILTERS: &[&str] = &[FILTER_GRAY, FILTER_RED, FILTER_GREEN, FILTER_BLUE];

/// Option keys understood by [`LoremFlickr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoremFlickrOption {
    /// Color filter.
    Filter,
    /// One keyword or a list of keywords.
    Keywords,
    /// `"or"` (default) or `"and"`.
    Logic,
}

impl OptionKey for LoremFlickrOption {
    const ALL: &'static [Self] = &[Self::Filter, Self::Keywords, Self::Logic];

    fn key(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Keywords => "keywords",
            Self::Logic => "logic",
        }
    }
}

/// How multiple keywords combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeywordLogic {
    /// Any keyword may match.
    #[default]
    Or,
    /// Every keyword must match.
    And,
}

impl KeywordLogic {
    /// Parse `"or"` / `"and"`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidArgument`] for any other value.
    pub fn parse(value: &str) -> Result<Self, ImageError> {
        match value {
            "or" => Ok(Self::Or),
            "and" => Ok(Self::And),
            other => Err(ImageError::InvalidArgument(format!(
                "Unsupported logic option value {other}. Valid: or, and"
            ))),
        }
    }
}

/// Resolved query for a keyword photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoQuery {
    /// Color filter, if any.
    pub filter: Option<String>,
    /// Keywords in caller order; empty for a random photo.
    pub keywords: Vec<String>,
    /// Keyword combination.
    pub logic: KeywordLogic,
}

impl PhotoQuery {
    /// Read the recognized keys from `options`.
    ///
    /// The logic value is only checked when keywords are present.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key holds a value of the wrong shape,
    /// or if keywords are given with an unsupported logic value.
    pub fn from_options(options: &Options) -> Result<Self, ImageError> {
        let mut query = Self::default();
        let mut logic = None;

        for (key, value) in options.recognized::<LoremFlickrOption>() {
            match key {
                LoremFlickrOption::Filter => {
                    query.filter =
                        value.as_text(key.key())?.filter(|f| !f.is_empty()).map(str::to_string);
                }
                LoremFlickrOption::Keywords => {
                    query.keywords = value.as_list(key.key())?.unwrap_or_default();
                }
                LoremFlickrOption::Logic => logic = value.as_text(key.key())?,
            }
        }

        if !query.keywords.is_empty() {
            if let Some(logic) = logic {
                query.logic = KeywordLogic::parse(logic)?;
            }
        }

        Ok(query)
    }
}

/// Provider for loremflickr.com.
#[derive(Debug, Clone)]
pub struct LoremFlickr {
    config: ServiceConfig,
}

impl Default for LoremFlickr {
    fn default() -> Self {
        Self::new()
    }
}

impl LoremFlickr {
    /// Provider with the service defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ServiceConfig {
                base_url: BASE_URL.to_string(),
                max_resolution: Some(MAX_IMAGE_RESOLUTION),
                extensions: EXTENSIONS,
                filters: FILTERS,
            },
        }
    }

    /// Provider with a custom base URL and/or ceiling.
    #[must_use]
    pub fn with_overrides(overrides: &ServiceOverrides) -> Self {
        let defaults = Self::new();
        Self { config: defaults.config.with_overrides(overrides) }
    }

    /// Build the URL for an already-resolved query.
    ///
    /// # Errors
    ///
    /// Returns an error on an unsupported filter or an invalid resolution.
    pub fn build_url(&self, width: i64, height: i64, query: &PhotoQuery) -> Result<String, ImageError> {
        let mut parts = vec![self.config.base_url.clone()];

        if let Some(ref filter) = query.filter {
            validate_filter(filter, self.config.filters)?;
            parts.push(filter.clone());
        }

        validate_resolution(width, height, self.config.max_resolution)?;
        parts.push(width.to_string());
        parts.push(height.to_string());

        if !query.keywords.is_empty() {
            parts.push(query.keywords.join(","));
            if query.logic == KeywordLogic::And {
                parts.push("all".to_string());
            }
        }

        Ok(parts.join("/"))
    }
}

impl ImageUrlProvider for LoremFlickr {
    fn service(&self) -> Service {
        Service::LoremFlickr
    }

    fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url_for(&self, width: i64, height: i64, options: &Options) -> Result<String, ImageError> {
        let query = PhotoQuery::from_options(options)?;
        let url = self.build_url(width, height, &query)?;
        debug!(%url, "built loremflickr url");
        Ok(url)
    }
}
