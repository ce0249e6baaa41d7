//! Identify a food from a photo and look up a matching recipe.
//!
//! The pipeline is strictly linear: normalize the uploaded image to canonical
//! JPEG bytes, classify it via the Spoonacular image classification API, then
//! resolve a recipe for the label via the Spoonacular search API. After a
//! successful image decode the pipeline always produces an answer: remote
//! failures are absorbed into a random known label and a built-in recipe
//! table rather than surfaced to the caller.

pub mod classifier;
pub mod config;
pub mod defaults;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolver;

use std::time::Duration;

use log::debug;

pub use classifier::{FoodClassifier, FALLBACK_FOODS};
pub use config::AppConfig;
pub use error::RecognizeError;
pub use model::{ClassificationResult, IdentifyResponse, Recipe};
pub use normalize::{normalize, ImageInput};
pub use resolver::RecipeResolver;

/// Build the HTTP client the API clients share their settings from
///
/// No timeout is applied unless one is configured, matching the behavior the
/// fallback paths are tuned for: a failed call falls back, a hung call blocks.
pub(crate) fn http_client(config: &AppConfig) -> reqwest::Client {
    let builder = match config.timeout {
        Some(secs) => reqwest::Client::builder().timeout(Duration::from_secs(secs)),
        None => reqwest::Client::builder(),
    };
    builder.build().unwrap_or_default()
}

/// Identify the food in an image and find a matching recipe
///
/// # Errors
/// Fails only when the image payload cannot be decoded. Classification and
/// recipe lookup never fail; see [`FoodClassifier::classify`] and
/// [`RecipeResolver::find_recipe`].
pub async fn identify(
    input: ImageInput,
    config: &AppConfig,
) -> Result<IdentifyResponse, RecognizeError> {
    let jpeg = normalize(input)?;
    debug!("Normalized upload to {} bytes", jpeg.len());

    let classification = FoodClassifier::new(config).classify(&jpeg).await;
    let recipe = RecipeResolver::new(config)
        .find_recipe(&classification.food_name)
        .await;

    Ok(IdentifyResponse {
        success: true,
        food: classification.food_name,
        confidence: classification.confidence,
        note: classification.note,
        recipe,
    })
}

/// Identify food from raw image bytes
pub async fn identify_bytes(
    bytes: Vec<u8>,
    config: &AppConfig,
) -> Result<IdentifyResponse, RecognizeError> {
    identify(ImageInput::Bytes(bytes), config).await
}

/// Identify food from a `data:image/...;base64,` string
pub async fn identify_data_url(
    data_url: impl Into<String>,
    config: &AppConfig,
) -> Result<IdentifyResponse, RecognizeError> {
    identify(ImageInput::DataUrl(data_url.into()), config).await
}
