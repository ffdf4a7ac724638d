//! General purpose image decoding

use imageproc::image::{guess_format, load_from_memory};

use super::{transform, ImageContainer, ImageDecoding};
use crate::context::{DecodingContext, ThumbnailOptions};
use crate::error::DecodeError;

/// Decodes any format the image crate supports (PNG, JPEG, GIF, WebP, ...).
///
/// Currently wraps the image crate's load_from_memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultDecoder {
    scale: f32,
    thumbnail: Option<ThumbnailOptions>,
}

impl Default for DefaultDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultDecoder {
    pub fn new() -> Self {
        Self::with_options(1.0, None)
    }

    pub fn with_options(scale: f32, thumbnail: Option<ThumbnailOptions>) -> Self {
        Self { scale, thumbnail }
    }

    /// Accepts the context only when the buffer starts with a known image signature.
    pub fn from_context(context: &DecodingContext<'_>) -> Option<Self> {
        let format = guess_format(context.data()).ok()?;
        log::debug!("Default decoder accepted {format:?} data");

        Some(Self::with_options(
            context.scale().unwrap_or(1.0),
            context.thumbnail(),
        ))
    }

    pub fn thumbnail(&self) -> Option<ThumbnailOptions> {
        self.thumbnail
    }
}

impl ImageDecoding for DefaultDecoder {
    fn decode(&self, data: &[u8]) -> Result<ImageContainer, DecodeError> {
        let format = guess_format(data).ok();
        let image = load_from_memory(data)?;

        let (image, is_thumbnail) = match self.thumbnail {
            Some(options) => match transform::thumbnail(&image, options) {
                Some(thumbnail) => (thumbnail, true),
                None => (image, false),
            },
            None => (image, false),
        };

        Ok(ImageContainer {
            image,
            format,
            scale: self.scale,
            is_thumbnail,
        })
    }

    fn is_asynchronous(&self) -> bool {
        self.thumbnail.is_some()
    }
}
