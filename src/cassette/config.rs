//! Loading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns [`ImageError::Config`] if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, ImageError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ImageError::Config(format!("Failed to read cassette file {}: {e}", path.display()))
    })?;
    let cassette: Cassette = serde_yaml::from_str(&content).map_err(|e| {
        ImageError::Config(format!("Failed to parse cassette file {}: {e}", path.display()))
    })?;
    Ok(CassetteReplayer::new(&cassette))
}
