use thiserror::Error;

/// Errors that can occur during food recognition
#[derive(Error, Debug)]
pub enum RecognizeError {
    /// Payload could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Data URL payload was not valid base64
    #[error("Failed to decode base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// String input was not a recognizable image data URL
    #[error("Invalid image data URL: {0}")]
    DataUrl(String),

    /// Failed to read from a stream input
    #[error("Failed to read image stream: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    ///
    /// Never reaches callers of [`identify`](crate::identify); the classifier
    /// and resolver absorb request failures into fallback values.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match any known classification shape
    ///
    /// Absorbed into the fallback path like a request failure.
    #[error("Malformed classification response: {0}")]
    Parse(String),
}
