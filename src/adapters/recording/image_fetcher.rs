//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::ImageError;
use crate::ports::image_fetcher::{FetchRequest, FetchedImage, ImageFetcher};

/// Records image downloads while delegating to an inner implementation.
pub struct RecordingImageFetcher {
    inner: Arc<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Arc<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError> {
        let result = self.inner.fetch(request);
        record_result(&self.recorder, "image_fetcher", "fetch", request, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher;

    impl ImageFetcher for StaticFetcher {
        fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError> {
            if request.url.ends_with("/404") {
                return Err(ImageError::Remote {
                    url: request.url.clone(),
                    status: 404,
                    message: "Not Found".into(),
                });
            }
            Ok(FetchedImage { data: vec![1, 2, 3], content_type: None })
        }
    }

    #[test]
    fn records_ok_and_err() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_fetcher.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec", "abc")));
        let fetcher = RecordingImageFetcher::new(Arc::new(StaticFetcher), Arc::clone(&recorder));

        let ok = fetcher.fetch(&FetchRequest { url: "https://example.com/1/1".into() });
        assert!(ok.is_ok());
        let err = fetcher.fetch(&FetchRequest { url: "https://example.com/404".into() });
        assert!(err.is_err());

        drop(fetcher);
        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("https://example.com/1/1"));
        assert!(content.contains("AQID"));
        assert!(content.contains("Unexpected response from https://example.com/404"));
    }
}
