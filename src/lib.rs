//! Placeholder images for test fixtures.
//!
//! Builds URLs for third-party placeholder services and, on request,
//! downloads the image into a local directory:
//!
//! - [`providers::DummyImage`]: dummyimage.com color blocks with optional text.
//! - [`providers::LoremFlickr`]: loremflickr.com photos filtered by keyword.
//!
//! [`PlaceholderImages`] pairs a provider with a download port and exposes
//! the two operations callers need: [`PlaceholderImages::url_for`] and
//! [`PlaceholderImages::fetch_and_save`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod facade;
pub mod options;
pub mod output;
pub mod ports;
pub mod providers;
pub mod validate;

pub use error::{ErrorKind, ImageError};
pub use facade::PlaceholderImages;
pub use options::{OptionValue, Options};
pub use providers::{ImageUrlProvider, Service};
