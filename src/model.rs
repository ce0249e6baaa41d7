use serde::{Deserialize, Serialize};

/// Outcome of classifying one image
///
/// `success` is false only when the image itself could not be decoded; remote
/// classification failures are absorbed into a fallback label with an advisory
/// `note` and still report success.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub success: bool,
    pub food_name: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ClassificationResult {
    pub fn ok(food_name: impl Into<String>, confidence: f64) -> Self {
        ClassificationResult {
            success: true,
            food_name: food_name.into(),
            confidence,
            error: None,
            note: None,
        }
    }

    pub fn fallback(food_name: impl Into<String>, confidence: f64, note: impl Into<String>) -> Self {
        ClassificationResult {
            success: true,
            food_name: food_name.into(),
            confidence,
            error: None,
            note: Some(note.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ClassificationResult {
            success: false,
            food_name: String::new(),
            confidence: 0.0,
            error: Some(error.into()),
            note: None,
        }
    }
}

/// A recipe: name plus ordered ingredient and instruction lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Full response of one identify operation
#[derive(Debug, Clone, Serialize)]
pub struct IdentifyResponse {
    pub success: bool,
    pub food: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub recipe: Recipe,
}
