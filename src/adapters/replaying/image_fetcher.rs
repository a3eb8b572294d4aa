//! Replaying adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;
use crate::ports::image_fetcher::{FetchRequest, FetchedImage, ImageFetcher};

/// Serves recorded downloads from a cassette.
pub struct ReplayingImageFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError> {
        let output = next_output(&self.replayer, "image_fetcher", "fetch")?;
        replay_result::<FetchedImage>(output).map_err(|message| ImageError::Remote {
            url: request.url.clone(),
            status: 0,
            message,
        })
    }
}
