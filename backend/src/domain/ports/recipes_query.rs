//! Driving port for reading recipes.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDetails, RecipeFilter, RecipeId, UserId};

/// Domain use-case port for recipe reads.
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// List the owner's recipes, newest first.
    async fn list_recipes(&self, owner: &UserId, filter: RecipeFilter)
    -> Result<Vec<Recipe>, Error>;

    /// Load one recipe with its tags and ingredients resolved.
    ///
    /// Missing recipes and recipes owned by someone else are both not found.
    async fn recipe_details(&self, owner: &UserId, id: RecipeId) -> Result<RecipeDetails, Error>;
}
