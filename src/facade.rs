//! Per-service entry point: build a URL, optionally download it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::live::http::HttpImageFetcher;
use crate::error::ImageError;
use crate::options::{Options, SaveOptions};
use crate::output::{FilenameGenerator, Persister};
use crate::ports::ImageFetcher;
use crate::providers::{ImageUrlProvider, Service, DEFAULT_EXTENSION};

/// A placeholder service plus the persister used to save its images.
///
/// ```no_run
/// use placeholder_images::{Options, PlaceholderImages, providers::LoremFlickr};
///
/// let images = PlaceholderImages::live(Box::new(LoremFlickr::new()));
/// let url = images.url_for(320, 240, &Options::new().with("keywords", ["paris", "girl"]))?;
/// let path = images.fetch_and_save(320, 240, &Options::new().with("keywords", "rio"))?;
/// # Ok::<(), placeholder_images::ImageError>(())
/// ```
pub struct PlaceholderImages {
    provider: Box<dyn ImageUrlProvider>,
    persister: Persister,
}

impl PlaceholderImages {
    /// Combine a provider with the fetcher used by [`Self::fetch_and_save`].
    #[must_use]
    pub fn new(provider: Box<dyn ImageUrlProvider>, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let persister = Persister::new(fetcher, provider.config().extensions);
        Self { provider, persister }
    }

    /// Provider that downloads over real HTTP.
    #[must_use]
    pub fn live(provider: Box<dyn ImageUrlProvider>) -> Self {
        Self::new(provider, Arc::new(HttpImageFetcher::new()))
    }

    /// Replace the filename generator (e.g. to pin the host seed).
    #[must_use]
    pub fn with_names(mut self, names: FilenameGenerator) -> Self {
        self.persister = self.persister.with_names(names);
        self
    }

    /// The wrapped service.
    #[must_use]
    pub fn service(&self) -> Service {
        self.provider.service()
    }

    /// Build the image URL. Unrecognized option keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn url_for(&self, width: i64, height: i64, options: &Options) -> Result<String, ImageError> {
        self.provider.url_for(width, height, options)
    }

    /// Build the image URL, download it, and save it.
    ///
    /// Reads `dir` (default: system temp dir), `full_path` (default: true) and
    /// `extension` (default: `jpg`) from `options`. Returns the full path or
    /// the bare filename.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, the download, or the write fails. No
    /// request is made when validation fails.
    pub fn fetch_and_save(
        &self,
        width: i64,
        height: i64,
        options: &Options,
    ) -> Result<PathBuf, ImageError> {
        let save = SaveOptions::from_options(options, DEFAULT_EXTENSION)?;
        let url = self.url_for(width, height, options)?;
        self.persister.save(&url, save.dir.as_deref(), &save.extension, save.full_path)
    }
}
