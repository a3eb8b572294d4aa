//! Recording adapters that capture interactions to cassettes.

pub mod image_fetcher;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::ImageError;

/// Append one call to the cassette as `{"Ok": ..}` or `{"Err": ".."}`.
///
/// Errors are stored by their display text; a value that fails to
/// serialize is skipped with a warning rather than failing the call.
pub(crate) fn record_result<I, T>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, ImageError>,
) where
    I: Serialize,
    T: Serialize,
{
    let output = match result {
        Ok(value) => serde_json::to_value(value).map(|inner| json!({ "Ok": inner })),
        Err(e) => Ok(json!({ "Err": e.to_string() })),
    };

    match (serde_json::to_value(input), output) {
        (Ok(input), Ok(output)) => {
            let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
            guard.record(port, method, input, output);
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(port, method, "skipping unrecordable interaction: {e}");
        }
    }
}
