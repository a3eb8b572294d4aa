//! Live adapter that downloads images with a blocking HTTP client.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::ImageError;
use crate::ports::image_fetcher::{FetchRequest, FetchedImage, ImageFetcher};

/// Live fetcher that issues a single GET per image.
///
/// Timeouts are the client defaults; nothing is retried.
pub struct HttpImageFetcher {
    client: Client,
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpImageFetcher {
    /// Create a fetcher with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    /// Create a fetcher around an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError> {
        let response = self.client.get(&request.url).send()?;

        let status = response.status();
        debug!(url = %request.url, status = status.as_u16(), "image service responded");

        if !status.is_success() {
            return Err(ImageError::Remote {
                url: request.url.clone(),
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unexpected status").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = response.bytes()?.to_vec();

        Ok(FetchedImage { data, content_type })
    }
}
