//! Decoder for images embedded in JSON responses

use parking_lot::Mutex;

use crate::context::{DecodingContext, ThumbnailOptions};
use crate::detect::is_candidate;
use crate::envelope::extract_image_bytes;
use crate::error::DecodeError;
use crate::image::{DefaultDecoder, ImageContainer, ImageDecoding};

/// Recognizes a JSON envelope, extracts the base64 `image` field and hands
/// the bytes to a [`DefaultDecoder`] configured like this one.
#[derive(Debug)]
pub struct JsonDecoder {
    scale: f32,
    thumbnail: Option<ThumbnailOptions>,
    lock: Mutex<()>,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    /// Unconditional decoder, skipping the candidate check.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            thumbnail: None,
            lock: Mutex::new(()),
        }
    }

    /// Returns `None` unless the data starts like JSON, so a registry can
    /// move on to the next decoder.
    pub fn from_context(context: &DecodingContext<'_>) -> Option<Self> {
        if !is_candidate(context.data()) {
            return None;
        }
        log::debug!("JSON decoder accepted {} bytes", context.data().len());

        Some(Self {
            scale: context.scale().unwrap_or(1.0),
            thumbnail: context.thumbnail(),
            lock: Mutex::new(()),
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn thumbnail(&self) -> Option<ThumbnailOptions> {
        self.thumbnail
    }
}

impl ImageDecoding for JsonDecoder {
    fn decode(&self, data: &[u8]) -> Result<ImageContainer, DecodeError> {
        let _guard = self.lock.lock();

        let image_data = extract_image_bytes(data).ok_or(DecodeError::UnrecognizedPayload)?;
        log::trace!("Extracted {} image bytes from envelope", image_data.len());

        DefaultDecoder::with_options(self.scale, self.thumbnail).decode(&image_data)
    }

    /// Thumbnail generation is CPU heavy, so only then is decoding worth
    /// moving off the caller's thread.
    fn is_asynchronous(&self) -> bool {
        self.thumbnail.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::wrap_image_bytes;
    use crate::test_utils::{envelope, png_bytes, PIXEL_PNG_BASE64};

    fn decoder_for(data: &[u8]) -> JsonDecoder {
        JsonDecoder::from_context(&DecodingContext::new(data)).unwrap()
    }

    #[test]
    fn recognizes_json_envelope() {
        let data = envelope(PIXEL_PNG_BASE64);
        assert!(JsonDecoder::from_context(&DecodingContext::new(&data)).is_some());
    }

    #[test]
    fn rejects_non_json_data() {
        let inputs: [&[u8]; 4] = [b"", b"\x89PNG\r\n\x1a\n", b"image", b" {}"];
        for data in inputs {
            assert!(JsonDecoder::from_context(&DecodingContext::new(data)).is_none());
        }
    }

    #[test]
    fn decodes_embedded_png() {
        let data = envelope(PIXEL_PNG_BASE64);
        let container = decoder_for(&data).decode(&data).unwrap();

        assert_eq!(container.dimensions(), (1, 1));
        assert!(!container.is_thumbnail);
    }

    #[test]
    fn invalid_json_is_unrecognized() {
        let data = b"{ image: invalid_json }";
        let err = decoder_for(data).decode(data).unwrap_err();
        assert!(matches!(err, DecodeError::UnrecognizedPayload));
    }

    #[test]
    fn missing_image_key_is_unrecognized() {
        let data = br#"{"other_key": "value"}"#;
        let err = decoder_for(data).decode(data).unwrap_err();
        assert!(matches!(err, DecodeError::UnrecognizedPayload));
    }

    #[test]
    fn invalid_base64_is_unrecognized() {
        let data = envelope("invalid_base64");
        let err = decoder_for(&data).decode(&data).unwrap_err();
        assert!(matches!(err, DecodeError::UnrecognizedPayload));
    }

    #[test]
    fn array_document_is_unrecognized() {
        let data = br#"["iVBORw0KGgo="]"#;
        let err = decoder_for(data).decode(data).unwrap_err();
        assert!(matches!(err, DecodeError::UnrecognizedPayload));
    }

    #[test]
    fn bad_embedded_image_is_image_error() {
        let data = wrap_image_bytes(b"definitely not a png");
        let err = JsonDecoder::new().decode(&data).unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn configuration_from_context() {
        let data = envelope(PIXEL_PNG_BASE64);

        let plain = decoder_for(&data);
        assert_eq!(plain.scale(), 1.0);
        assert!(!plain.is_asynchronous());

        let context = DecodingContext::new(&data)
            .with_scale(3.0)
            .with_thumbnail(ThumbnailOptions::new(4, 4));
        let configured = JsonDecoder::from_context(&context).unwrap();
        assert_eq!(configured.scale(), 3.0);
        assert!(configured.is_asynchronous());
        assert_eq!(configured.decode(&data).unwrap().scale, 3.0);
    }

    #[test]
    fn thumbnail_applied_to_embedded_image() {
        let data = wrap_image_bytes(&png_bytes(64, 32));
        let context = DecodingContext::new(&data).with_thumbnail(ThumbnailOptions::new(16, 16));

        let container = JsonDecoder::from_context(&context)
            .unwrap()
            .decode(&data)
            .unwrap();
        assert!(container.is_thumbnail);
        assert_eq!(container.dimensions(), (16, 8));
    }

    #[test]
    fn concurrent_decodes_keep_their_own_payload() {
        let decoder = JsonDecoder::new();
        let payloads: Vec<_> = (1..=8u32)
            .map(|n| (n, wrap_image_bytes(&png_bytes(n, n + 1))))
            .collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = payloads
                .iter()
                .map(|(n, data)| {
                    let decoder = &decoder;
                    s.spawn(move || (*n, decoder.decode(data).unwrap().dimensions()))
                })
                .collect();

            for handle in handles {
                let (n, dimensions) = handle.join().unwrap();
                assert_eq!(dimensions, (n, n + 1));
            }
        });
    }
}
