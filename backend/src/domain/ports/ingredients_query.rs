//! Driving port for reading a user's ingredients.

use async_trait::async_trait;

use crate::domain::{AssignmentFilter, Error, Ingredient, UserId};

#[async_trait]
pub trait IngredientsQuery: Send + Sync {
    /// List ingredients owned by `owner`, name descending.
    async fn list_ingredients(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Ingredient>, Error>;
}
