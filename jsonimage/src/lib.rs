pub mod context;
pub mod detect;
pub mod envelope;
pub mod error;
pub mod image;
pub mod json;
pub mod registration;
pub mod registry;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use context::{DecodingContext, ThumbnailOptions};
pub use error::DecodeError;
pub use image::{DefaultDecoder, ImageContainer, ImageDecoding};
pub use json::JsonDecoder;
pub use registration::{ensure_registered, Registration};
pub use registry::{DecoderFactory, DecoderRegistry, RegisterDecoder};
