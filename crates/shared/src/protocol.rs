//! TheMealDB wire format.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Recipe, RecipeId},
    error::SourceError,
};

/// Envelope returned by `random.php`. `meals` is `null` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id_meal: String,
    #[serde(rename = "strMeal")]
    pub str_meal: String,
    #[serde(rename = "strMealThumb", default)]
    pub str_meal_thumb: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub str_category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub str_area: Option<String>,
}

impl From<MealRecord> for Recipe {
    fn from(value: MealRecord) -> Self {
        Self {
            id: RecipeId(value.id_meal),
            name: value.str_meal,
            thumbnail_url: value.str_meal_thumb.unwrap_or_default(),
            category: value.str_category.unwrap_or_default(),
            area: value.str_area.unwrap_or_default(),
        }
    }
}

impl MealsEnvelope {
    /// Takes the first meal of the envelope; the random endpoint always sends one.
    pub fn into_first_recipe(self) -> Result<Recipe, SourceError> {
        self.meals
            .and_then(|meals| meals.into_iter().next())
            .map(Recipe::from)
            .ok_or(SourceError::Empty)
    }
}

pub fn decode_random_response(body: &[u8]) -> Result<Recipe, SourceError> {
    let envelope: MealsEnvelope = serde_json::from_slice(body)?;
    envelope.into_first_recipe()
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
