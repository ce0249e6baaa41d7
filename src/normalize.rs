use std::io::{Cursor, Read};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use log::debug;

use crate::error::RecognizeError;

/// An uploaded image in one of the shapes the API accepts
pub enum ImageInput {
    /// Raw image bytes in any supported format
    Bytes(Vec<u8>),
    /// A `data:image/...;base64,` encoded string
    DataUrl(String),
    /// An open readable stream, e.g. an uploaded file
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageInput::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            ImageInput::DataUrl(s) => f.debug_tuple("DataUrl").field(&s.len()).finish(),
            ImageInput::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

/// Normalize an uploaded image to canonical JPEG bytes
///
/// Raw bytes and streams are decoded and re-encoded as JPEG. Data URLs are
/// base64-decoded and validated as an image, but the decoded bytes are passed
/// through unchanged rather than re-encoded.
///
/// # Errors
/// Returns an error when the payload cannot be interpreted as an image. This
/// is the only hard failure of the recognition pipeline.
pub fn normalize(input: ImageInput) -> Result<Vec<u8>, RecognizeError> {
    match input {
        ImageInput::Bytes(bytes) => reencode_jpeg(&bytes),
        ImageInput::DataUrl(url) => {
            if !url.starts_with("data:image") {
                return Err(RecognizeError::DataUrl(
                    "expected a string starting with 'data:image'".to_string(),
                ));
            }
            let encoded = url.split_once(',').map(|(_, rest)| rest).ok_or_else(|| {
                RecognizeError::DataUrl("missing ',' separator after data URL header".to_string())
            })?;
            let bytes = STANDARD.decode(encoded)?;
            // Validate, but keep the decoded bytes as-is
            image::load_from_memory(&bytes)?;
            debug!("Decoded {} bytes from data URL", bytes.len());
            Ok(bytes)
        }
        ImageInput::Reader(mut reader) => {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            reencode_jpeg(&bytes)
        }
    }
}

fn reencode_jpeg(bytes: &[u8]) -> Result<Vec<u8>, RecognizeError> {
    let img = image::load_from_memory(bytes)?;
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Jpeg)?;
    let jpeg = buffer.into_inner();
    debug!("Normalized image to {} JPEG bytes", jpeg.len());
    Ok(jpeg)
}
