//! Port abstraction for recipe persistence adapters.
use async_trait::async_trait;

use crate::domain::{Recipe, RecipeFilter, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// List the owner's recipes matching `filter`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one recipe if it exists and belongs to `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Persist a recipe and its tag and ingredient links atomically.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Delete the owner's recipe; returns `false` when nothing matched.
    async fn delete_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<bool, RecipeRepositoryError>;
}
