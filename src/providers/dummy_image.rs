//! dummyimage.com: `{base}/{W}x{H}/{bg}/{fg}[.{ext}][&text=...]`.

use tracing::debug;
use url::form_urlencoded;

use super::{ImageUrlProvider, Service, ServiceConfig, ServiceOverrides, EXTENSIONS};
use crate::error::ImageError;
use crate::options::{OptionKey, Options};
use crate::validate::{validate_color, validate_extension, validate_resolution};

/// Default service URL.
pub const BASE_URL: &str = "https://dummyimage.com";

/// The service errors out above this many pixels.
pub const MAX_IMAGE_RESOLUTION: u64 = 15_992_001;

/// Background color used when none is given.
pub const DEFAULT_BG_COLOR: &str = "0";

/// Foreground (text) color used when none is given.
pub const DEFAULT_FG_COLOR: &str = "f";

/// Option keys understood by [`DummyImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyImageOption {
    /// Background color, hex.
    Background,
    /// Foreground color, hex.
    Foreground,
    /// Overlay text.
    Text,
    /// Image extension appended to the URL.
    Extension,
}

impl OptionKey for DummyImageOption {
    const ALL: &'static [Self] = &[Self::Background, Self::Foreground, Self::Text, Self::Extension];

    fn key(self) -> &'static str {
        match self {
            Self::Background => "bg",
            Self::Foreground => "fg",
            Self::Text => "text",
            Self::Extension => "extension",
        }
    }
}

/// Resolved style for a block image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStyle {
    /// Background color.
    pub background: String,
    /// Foreground color.
    pub foreground: String,
    /// Extension suffix, if any.
    pub extension: Option<String>,
    /// Overlay text, if any.
    pub text: Option<String>,
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BG_COLOR.to_string(),
            foreground: DEFAULT_FG_COLOR.to_string(),
            extension: None,
            text: None,
        }
    }
}

impl BlockStyle {
    /// Read the recognized keys from `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key holds a value of the wrong shape.
    pub fn from_options(options: &Options) -> Result<Self, ImageError> {
        let mut style = Self::default();
        for (key, value) in options.recognized::<DummyImageOption>() {
            let text = value.as_text(key.key())?;
            match key {
                DummyImageOption::Background => {
                    if let Some(color) = text {
                        style.background = color.to_string();
                    }
                }
                DummyImageOption::Foreground => {
                    if let Some(color) = text {
                        style.foreground = color.to_string();
                    }
                }
                DummyImageOption::Text => {
                    style.text = text.filter(|t| !t.is_empty()).map(str::to_string);
                }
                DummyImageOption::Extension => {
                    style.extension = text.filter(|e| !e.is_empty()).map(str::to_string);
                }
            }
        }
        Ok(style)
    }
}

/// Provider for dummyimage.com.
#[derive(Debug, Clone)]
pub struct DummyImage {
    config: ServiceConfig,
}

impl Default for DummyImage {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyImage {
    /// Provider with the service defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ServiceConfig {
                base_url: BASE_URL.to_string(),
                max_resolution: Some(MAX_IMAGE_RESOLUTION),
                extensions: EXTENSIONS,
                filters: &[],
            },
        }
    }

    /// Provider with a custom base URL and/or ceiling.
    #[must_use]
    pub fn with_overrides(overrides: &ServiceOverrides) -> Self {
        let defaults = Self::new();
        Self { config: defaults.config.with_overrides(overrides) }
    }

    /// Build the URL for an already-resolved style.
    ///
    /// # Errors
    ///
    /// Returns an error on the first invalid dimension, color, or extension.
    pub fn build_url(&self, width: i64, height: i64, style: &BlockStyle) -> Result<String, ImageError> {
        let mut parts = vec![self.config.base_url.clone()];

        validate_resolution(width, height, self.config.max_resolution)?;
        parts.push(format!("{width}x{height}"));

        validate_color(&style.background)?;
        parts.push(style.background.clone());

        validate_color(&style.foreground)?;
        parts.push(style.foreground.clone());

        let mut url = parts.join("/");

        if let Some(ref extension) = style.extension {
            validate_extension(extension, self.config.extensions)?;
            url.push('.');
            url.push_str(extension);
        }

        if let Some(ref text) = style.text {
            url.push_str("&text=");
            url.push_str(&encode_text(text));
        }

        Ok(url)
    }
}

/// Encode overlay text the way the service has always received it: the text
/// is form-encoded, and the encoded form is then encoded again as the query
/// value (`"a b"` becomes `a%2Bb`).
fn encode_text(text: &str) -> String {
    let once: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    form_urlencoded::byte_serialize(once.as_bytes()).collect()
}

impl ImageUrlProvider for DummyImage {
    fn service(&self) -> Service {
        Service::DummyImage
    }

    fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url_for(&self, width: i64, height: i64, options: &Options) -> Result<String, ImageError> {
        let style = BlockStyle::from_options(options)?;
        let url = self.build_url(width, height, &style)?;
        debug!(%url, "built dummyimage url");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn url(width: i64, height: i64, options: &Options) -> Result<String, ImageError> {
        DummyImage::new().url_for(width, height, options)
    }

    #[test]
    fn basics() {
        assert_eq!(url(600, 400, &Options::new()).unwrap(), "https://dummyimage.com/600x400/0/f");
    }

    #[test]
    fn bg_color() {
        let options = Options::new().with("bg", "ffffff");
        assert_eq!(url(600, 400, &options).unwrap(), "https://dummyimage.com/600x400/ffffff/f");
    }

    #[test]
    fn fg_color() {
        let options = Options::new().with("fg", "ffffff");
        assert_eq!(url(600, 400, &options).unwrap(), "https://dummyimage.com/600x400/0/ffffff");
    }

    #[test]
    fn extension() {
        let options = Options::new().with("fg", "ffffff").with("extension", "jpg");
        assert_eq!(
            url(600, 400, &options).unwrap(),
            "https://dummyimage.com/600x400/0/ffffff.jpg"
        );
    }

    #[test]
    fn text() {
        let options = Options::new().with("fg", "ffffff").with("text", "some text here");
        assert_eq!(
            url(600, 400, &options).unwrap(),
            "https://dummyimage.com/600x400/0/ffffff&text=some%2Btext%2Bhere"
        );
    }

    #[test]
    fn full_style() {
        let options = Options::new()
            .with("bg", "000000")
            .with("fg", "ffffff")
            .with("text", "some text here")
            .with("extension", "png");
        let built = url(320, 240, &options).unwrap();
        assert!(built.starts_with("https://dummyimage.com/320x240/000000/ffffff.png&text="));
        assert!(built.ends_with("some%2Btext%2Bhere"));
    }

    #[test]
    fn text_with_reserved_characters() {
        let options = Options::new().with("text", "a&b=c");
        let built = url(10, 10, &options).unwrap();
        assert_eq!(built, "https://dummyimage.com/10x10/0/f&text=a%2526b%253Dc");
    }

    #[test]
    fn empty_text_and_extension_are_absent() {
        let options = Options::new().with("text", "").with("extension", "");
        assert_eq!(url(1, 1, &options).unwrap(), "https://dummyimage.com/1x1/0/f");
    }

    #[test]
    fn unknown_options_are_ignored() {
        let options = Options::new()
            .with("some_extra_unknown_options", "does_not")
            .with("keywords", ["dog"])
            .with("filter", "g");
        assert_eq!(url(600, 400, &options).unwrap(), "https://dummyimage.com/600x400/0/f");
    }

    #[test]
    fn invalid_bg_color() {
        let options = Options::new().with("bg", "jrwe0tpwjertwherk");
        assert_eq!(url(600, 400, &options).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn invalid_fg_color() {
        let options = Options::new().with("fg", "jrwe0tpwjertwherk");
        assert_eq!(url(600, 400, &options).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn invalid_extension() {
        let options = Options::new().with("extension", "dafasdf");
        assert_eq!(url(600, 400, &options).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn invalid_resolution() {
        assert_eq!(url(100, -100, &Options::new()).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(url(0, 0, &Options::new()).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn resolution_ceiling() {
        let limit = i64::try_from(MAX_IMAGE_RESOLUTION).unwrap();
        assert!(url(limit, 1, &Options::new()).is_ok());
        assert_eq!(url(limit + 1, 1, &Options::new()).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn resolution_checked_before_colors() {
        let options = Options::new().with("bg", "nothex");
        assert_eq!(url(0, 10, &options).unwrap_err().kind(), ErrorKind::InvalidArgument);
        let limit = i64::try_from(MAX_IMAGE_RESOLUTION).unwrap();
        assert_eq!(url(limit + 1, 1, &options).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn overrides() {
        let provider = DummyImage::with_overrides(&ServiceOverrides {
            base_url: Some("http://localhost:9000".into()),
            max_resolution: Some(100),
        });
        assert_eq!(
            provider.url_for(10, 10, &Options::new()).unwrap(),
            "http://localhost:9000/10x10/0/f"
        );
        assert_eq!(
            provider.url_for(11, 10, &Options::new()).unwrap_err().kind(),
            ErrorKind::OutOfBounds
        );
    }
}
