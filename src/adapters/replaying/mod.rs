//! Replaying adapters that serve recorded interactions.

pub mod shell;

use serde::de::DeserializeOwned;

pub use shell::ReplayingShellExecutor;

/// Decode a recorded `{"Ok": v}` / `{"Err": message}` output.
///
/// Mirror of `recording::record_result`. A payload that does not match the
/// expected shape replays as an error carrying the serde message.
pub(crate) fn replay_result<T>(output: &serde_json::Value) -> Result<T, String>
where
    T: DeserializeOwned,
{
    if let Some(err) = output.get("Err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output.get("Ok").unwrap_or(output);
    T::deserialize(value).map_err(|e| format!("malformed recorded output: {e}"))
}
