use log::{debug, info, warn};
use rand::seq::SliceRandom;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::RecognizeError;
use crate::model::ClassificationResult;

/// Known food labels used when the classification API is unavailable
pub const FALLBACK_FOODS: [&str; 16] = [
    "pizza",
    "pasta carbonara",
    "sushi",
    "burger",
    "taco",
    "fried rice",
    "curry",
    "steak",
    "salad",
    "soup",
    "pancakes",
    "ice cream",
    "chocolate cake",
    "apple pie",
    "sandwich",
    "butter chicken",
];

const FALLBACK_CONFIDENCE: f64 = 0.7;
const FALLBACK_NOTE: &str = "Using fallback due to API error";

/// Client for the Spoonacular image classification endpoint
pub struct FoodClassifier {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FoodClassifier {
    /// Create a new classifier from configuration
    pub fn new(config: &AppConfig) -> Self {
        FoodClassifier {
            client: crate::http_client(config),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        FoodClassifier {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Normalize an uploaded image and classify it
    ///
    /// An image that cannot be decoded produces a `success: false` result
    /// with an error message; everything past the decode always succeeds.
    pub async fn recognize(&self, input: crate::ImageInput) -> ClassificationResult {
        match crate::normalize(input) {
            Ok(jpeg) => self.classify(&jpeg).await,
            Err(e) => ClassificationResult::failed(e.to_string()),
        }
    }

    /// Classify canonical JPEG bytes into a food label
    ///
    /// Never fails: any HTTP error, bad status, or unparseable body is
    /// absorbed by picking a random label from [`FALLBACK_FOODS`] and
    /// attaching an advisory note.
    pub async fn classify(&self, jpeg: &[u8]) -> ClassificationResult {
        match self.request_classification(jpeg.to_vec()).await {
            Ok((food_name, confidence)) => {
                info!("Identified food: {} with confidence {}", food_name, confidence);
                ClassificationResult::ok(food_name, confidence)
            }
            Err(e) => {
                let food_name = FALLBACK_FOODS
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(FALLBACK_FOODS[0]);
                warn!("Classification API failed ({}), falling back to: {}", e, food_name);
                ClassificationResult::fallback(food_name, FALLBACK_CONFIDENCE, FALLBACK_NOTE)
            }
        }
    }

    async fn request_classification(&self, jpeg: Vec<u8>) -> Result<(String, f64), RecognizeError> {
        let part = Part::bytes(jpeg)
            .file_name("image.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/food/images/classify", self.base_url))
            .query(&[("apiKey", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        debug!("Classification API response: {:?}", body);

        parse_classification(&body).ok_or_else(|| {
            RecognizeError::Parse("classification object has no name".to_string())
        })
    }
}

/// Extract a (label, confidence) pair from a classification response
///
/// The API has returned several shapes over time; they are tried in order,
/// first match wins. `None` means the body carried a `classification` object
/// without a usable name, which the caller treats like a failed request.
fn parse_classification(body: &Value) -> Option<(String, f64)> {
    if let Some(category) = body.get("category").and_then(Value::as_str) {
        let confidence = body.get("probability").and_then(Value::as_f64).unwrap_or(0.8);
        return Some((category.to_string(), confidence));
    }

    if let Some(classification) = body.get("classification") {
        let name = classification.get("name").and_then(Value::as_str)?;
        let confidence = classification
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.8);
        return Some((name.to_string(), confidence));
    }

    // Last resort: treat the first non-envelope key, in document order, as
    // the label
    let label = body
        .as_object()
        .and_then(|map| {
            map.keys()
                .find(|key| !matches!(key.as_str(), "status" | "code" | "message"))
        })
        .map(String::as_str)
        .unwrap_or("unknown food");
    Some((label.to_string(), 0.7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn classifier_for(server: &Server) -> FoodClassifier {
        FoodClassifier::with_base_url("fake_api_key".to_string(), server.url())
    }

    #[tokio::test]
    async fn test_classify_category_shape() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::UrlEncoded(
                "apiKey".into(),
                "fake_api_key".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"category": "pizza", "probability": 0.92}"#)
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert!(result.success);
        assert_eq!(result.food_name, "pizza");
        assert_eq!(result.confidence, 0.92);
        assert!(result.note.is_none());
        mock.assert();
    }

    #[tokio::test]
    async fn test_classify_category_shape_default_probability() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"category": "sushi"}"#)
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert_eq!(result.food_name, "sushi");
        assert_eq!(result.confidence, 0.8);
    }

    #[tokio::test]
    async fn test_classify_nested_classification_shape() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"classification": {"name": "burger", "confidence": 0.85}}"#)
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert!(result.success);
        assert_eq!(result.food_name, "burger");
        assert_eq!(result.confidence, 0.85);
    }

    #[tokio::test]
    async fn test_classify_unknown_shape_uses_first_key() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "ok", "taco": {}}"#)
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert_eq!(result.food_name, "taco");
        assert_eq!(result.confidence, 0.7);
    }

    #[tokio::test]
    async fn test_classify_server_error_falls_back() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert!(result.success);
        assert!(FALLBACK_FOODS.contains(&result.food_name.as_str()));
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.note.as_deref(), Some("Using fallback due to API error"));
        assert!(result.error.is_none());
        mock.assert();
    }

    #[tokio::test]
    async fn test_classify_unreachable_server_falls_back() {
        // Nothing listens on this port
        let classifier = FoodClassifier::with_base_url(
            "fake_api_key".to_string(),
            "http://127.0.0.1:1".to_string(),
        );

        let result = classifier.classify(b"jpeg bytes").await;
        assert!(result.success);
        assert!(FALLBACK_FOODS.contains(&result.food_name.as_str()));
        assert!(result.note.is_some());
    }

    #[tokio::test]
    async fn test_recognize_invalid_image_reports_error() {
        let classifier = FoodClassifier::with_base_url(
            "fake_api_key".to_string(),
            "http://127.0.0.1:1".to_string(),
        );

        let result = classifier
            .recognize(crate::ImageInput::Bytes(b"not an image".to_vec()))
            .await;
        assert!(!result.success);
        assert!(!result.error.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_classify_classification_without_name_falls_back() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/food/images/classify")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"classification": {}}"#)
            .create();

        let result = classifier_for(&server).classify(b"jpeg bytes").await;
        assert!(result.success);
        assert!(FALLBACK_FOODS.contains(&result.food_name.as_str()));
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.note.as_deref(), Some("Using fallback due to API error"));
    }

    #[test]
    fn test_parse_classification_prefers_category() {
        let body = serde_json::json!({
            "category": "curry",
            "probability": 0.6,
            "classification": {"name": "soup", "confidence": 0.9}
        });
        let (label, confidence) = parse_classification(&body).unwrap();
        assert_eq!(label, "curry");
        assert_eq!(confidence, 0.6);
    }

    #[test]
    fn test_parse_classification_uses_document_order() {
        // Key order matters: "apple" sorts before "taco" but comes later
        let body: serde_json::Value =
            serde_json::from_str(r#"{"taco": {}, "code": 1, "apple": {}}"#).unwrap();
        let (label, confidence) = parse_classification(&body).unwrap();
        assert_eq!(label, "taco");
        assert_eq!(confidence, 0.7);
    }

    #[test]
    fn test_parse_classification_rejects_nameless_classification() {
        let body = serde_json::json!({"classification": {"confidence": 0.9}});
        assert!(parse_classification(&body).is_none());
    }

    #[test]
    fn test_parse_classification_envelope_only() {
        let body = serde_json::json!({"status": "failure", "code": 402, "message": "quota"});
        let (label, confidence) = parse_classification(&body).unwrap();
        assert_eq!(label, "unknown food");
        assert_eq!(confidence, 0.7);
    }
}
