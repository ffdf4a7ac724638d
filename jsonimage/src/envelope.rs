//! JSON envelopes carrying a base64 encoded image:
//!
//! ```text
//! { "image": "iVBORw0KGgo..." }
//! ```
//!
//! Any other keys are ignored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

pub const IMAGE_KEY: &str = "image";

/// Pull the embedded image bytes out of an envelope.
///
/// Invalid JSON, a non-object document, a missing or non-string `image` and
/// bad base64 all give `None`; callers only care whether it worked.
pub fn extract_image_bytes(data: &[u8]) -> Option<Vec<u8>> {
    let document: Value = serde_json::from_slice(data)
        .map_err(|e| log::trace!("Envelope is not valid JSON: {}", e))
        .ok()?;

    let encoded = document.as_object()?.get(IMAGE_KEY)?.as_str()?;

    STANDARD
        .decode(encoded)
        .map_err(|e| log::trace!("Envelope image is not valid base64: {}", e))
        .ok()
}

/// Build an envelope around raw image bytes.
pub fn wrap_image_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut envelope = Map::new();
    envelope.insert(IMAGE_KEY.to_string(), Value::String(STANDARD.encode(bytes)));

    serde_json::to_vec(&Value::Object(envelope)).expect("Writing to vec should never fail")
}
