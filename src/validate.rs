//! Input validation shared by every URL grammar and the persister.
//!
//! All checks are local and leave nothing behind. The first violation aborts the
//! call, so no partial URL ever escapes a builder.

use std::path::Path;

use crate::error::ImageError;

/// Validate that both dimensions are positive and, when a ceiling is set,
/// that `width * height` does not exceed it.
///
/// # Errors
///
/// Returns [`ImageError::InvalidArgument`] for a non-positive dimension and
/// [`ImageError::OutOfBounds`] when the pixel count exceeds `limit`.
pub fn validate_resolution(width: i64, height: i64, limit: Option<u64>) -> Result<(), ImageError> {
    if width <= 0 {
        return Err(ImageError::InvalidArgument(format!("Invalid width {width}")));
    }
    if height <= 0 {
        return Err(ImageError::InvalidArgument(format!("Invalid height {height}")));
    }

    if let Some(limit) = limit {
        // Both factors are positive i64, so the product always fits in u128.
        let resolution = u128::from(width.unsigned_abs()) * u128::from(height.unsigned_abs());
        if resolution > u128::from(limit) {
            return Err(ImageError::OutOfBounds(format!(
                "Resolution is limited to {limit} (height * width), got {resolution}"
            )));
        }
    }

    Ok(())
}

/// Validate a 1-6 digit hexadecimal color such as `"f"` or `"00ff00"`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidArgument`] if the value is not hex or is too long.
pub fn validate_color(value: &str) -> Result<(), ImageError> {
    if (1..=6).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ImageError::InvalidArgument(format!("Invalid color {value}")))
    }
}

/// Validate an image extension against a provider's supported set.
///
/// An empty value means "not supplied" and always passes.
///
/// # Errors
///
/// Returns [`ImageError::InvalidArgument`] if the extension is not supported.
pub fn validate_extension(value: &str, supported: &[&str]) -> Result<(), ImageError> {
    if value.is_empty() || supported.contains(&value) {
        Ok(())
    } else {
        Err(ImageError::InvalidArgument(format!(
            "Invalid image format {value}. Valid: {}",
            supported.join(", ")
        )))
    }
}

/// Validate a color filter against a provider's supported set.
///
/// An empty value means "not supplied" and always passes.
///
/// # Errors
///
/// Returns [`ImageError::InvalidArgument`] if the filter is not supported.
pub fn validate_filter(value: &str, supported: &[&str]) -> Result<(), ImageError> {
    if value.is_empty() || supported.contains(&value) {
        Ok(())
    } else {
        Err(ImageError::InvalidArgument(format!(
            "Invalid filter {value}. Valid: {}",
            supported.join(", ")
        )))
    }
}

/// Validate that `path` is an existing, writable directory.
///
/// # Errors
///
/// Returns [`ImageError::InvalidArgument`] if the directory is missing,
/// is not a directory, or the current user cannot create files in it.
pub fn validate_writable_directory(path: &Path) -> Result<(), ImageError> {
    let is_dir = std::fs::metadata(path).is_ok_and(|meta| meta.is_dir());

    // Permission bits say nothing about ownership; only a real create does.
    if is_dir && tempfile::tempfile_in(path).is_ok() {
        Ok(())
    } else {
        Err(ImageError::InvalidArgument(format!("Cannot write to directory {}", path.display())))
    }
}
