use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::defaults::{default_recipe, title_case};
use crate::error::RecognizeError;
use crate::model::Recipe;

const NO_INSTRUCTIONS: &str = "No instructions available";

/// Client for the Spoonacular recipe search and information endpoints
pub struct RecipeResolver {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RecipeResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &AppConfig) -> Self {
        RecipeResolver {
            client: crate::http_client(config),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        RecipeResolver {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Find a recipe for a food label
    ///
    /// Searches the remote API for one matching recipe and fetches its full
    /// details. Never fails: a bad status, transport error, or empty result
    /// set falls through to the built-in recipe table.
    pub async fn find_recipe(&self, food_name: &str) -> Recipe {
        match self.fetch_remote(food_name).await {
            Ok(Some(recipe)) => {
                info!("Found remote recipe '{}' for {}", recipe.name, food_name);
                recipe
            }
            Ok(None) => {
                info!("No remote recipe for {}, using built-in table", food_name);
                default_recipe(food_name)
            }
            Err(e) => {
                warn!("Recipe API failed for {} ({}), using built-in table", food_name, e);
                default_recipe(food_name)
            }
        }
    }

    /// Search for a recipe id, then fetch and extract its details
    ///
    /// `Ok(None)` means the search succeeded but returned no results.
    async fn fetch_remote(&self, food_name: &str) -> Result<Option<Recipe>, RecognizeError> {
        let search: Value = self
            .client
            .get(format!("{}/recipes/complexSearch", self.base_url))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("query", food_name),
                ("number", "1"),
                ("instructionsRequired", "true"),
                ("fillIngredients", "true"),
                ("addRecipeInformation", "true"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Recipe search response: {:?}", search);

        let recipe_id = match search["results"][0]["id"].as_i64() {
            Some(id) => id,
            None => return Ok(None),
        };

        let details: Value = self
            .client
            .get(format!("{}/recipes/{}/information", self.base_url, recipe_id))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("includeNutrition", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Recipe information response: {:?}", details);

        Ok(Some(extract_recipe(&details, food_name)))
    }
}

/// Build a [`Recipe`] from a recipe information response
fn extract_recipe(details: &Value, food_name: &str) -> Recipe {
    let name = details
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(food_name));

    let ingredients = details
        .get("extendedIngredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.get("original")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default();

    // Structured steps from the first instruction group when present,
    // otherwise the summary text
    let instructions = match details
        .get("analyzedInstructions")
        .and_then(Value::as_array)
        .and_then(|groups| groups.first())
    {
        Some(group) => group
            .get("steps")
            .and_then(Value::as_array)
            .map(|steps| {
                steps
                    .iter()
                    .map(|step| {
                        step.get("step")
                            .and_then(Value::as_str)
                            .unwrap_or("")
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_default(),
        None => vec![details
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or(NO_INSTRUCTIONS)
            .to_string()],
    };

    Recipe {
        name,
        ingredients,
        instructions,
    }
}
