//! Driving port for recipe mutations.

use async_trait::async_trait;

use crate::domain::{Error, RecipeDetails, RecipeDraft, RecipeId, UserId};

/// Domain use-case port for recipe writes.
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Create a recipe; every referenced tag and ingredient must belong to `owner`.
    async fn create_recipe(&self, owner: &UserId, draft: RecipeDraft)
    -> Result<RecipeDetails, Error>;

    /// Delete one of the owner's recipes.
    async fn delete_recipe(&self, owner: &UserId, id: RecipeId) -> Result<(), Error>;
}
