//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_fetcher;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Pull the next recorded output for `port::method` off the cassette.
///
/// # Errors
///
/// Returns [`ImageError::Config`] if the cassette has no more interactions
/// for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<Value, ImageError> {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).map(|interaction| interaction.output)
}

/// Turn a recorded `{"Ok": ..}` / `{"Err": ".."}` output back into a result.
///
/// A bare value without either wrapper is read as `Ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value) -> Result<T, String> {
    let ok = match output {
        Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                return Err(err.as_str().map_or_else(|| err.to_string(), str::to_string));
            }
            map.remove("Ok").unwrap_or(Value::Object(map))
        }
        other => other,
    };
    serde_json::from_value(ok).map_err(|e| format!("malformed replayed output: {e}"))
}
