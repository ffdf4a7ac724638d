//! Image containers and the decoders that produce them

mod default;
mod transform;

pub use default::DefaultDecoder;

use imageproc::image::{DynamicImage, ImageFormat};

use crate::error::DecodeError;

/// A decoded image plus what the decoder learned while producing it.
#[derive(Debug, Clone)]
pub struct ImageContainer {
    pub image: DynamicImage,
    /// Source format, when it could be sniffed from the bytes
    pub format: Option<ImageFormat>,
    pub scale: f32,
    /// Set when the image was downsampled to the requested thumbnail size
    pub is_thumbnail: bool,
}

impl ImageContainer {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Turns a buffer into an [`ImageContainer`].
///
/// Implementations are shared between loader threads, so decoding takes
/// `&self` and any mutable state has to be synchronized by the decoder.
pub trait ImageDecoding: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<ImageContainer, DecodeError>;

    /// Whether the caller should schedule `decode` off its own thread
    fn is_asynchronous(&self) -> bool {
        false
    }
}
