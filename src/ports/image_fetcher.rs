//! Image fetcher port for placeholder image services.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A request to download one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Fully built image URL.
    pub url: String,
}

/// Image bytes returned by a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedImage {
    /// Raw response body.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// `Content-Type` header, when the service sent one.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Downloads images over HTTP.
///
/// Implementations issue exactly one request per call and never retry.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the body at `request.url`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Remote`] for a non-success status and
    /// [`ImageError::Network`] for transport failures.
    fn fetch(&self, request: &FetchRequest) -> Result<FetchedImage, ImageError>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
