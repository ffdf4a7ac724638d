use imageproc::image::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The buffer looked like JSON but did not carry a base64 `image` string.
    #[error("payload is not a JSON envelope with a base64 encoded image")]
    UnrecognizedPayload,
    #[error("failed to decode image: {0}")]
    Image(#[from] ImageError),
    #[error("no registered decoder accepts the data")]
    NoDecoder,
}
