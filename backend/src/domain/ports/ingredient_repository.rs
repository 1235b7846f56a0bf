//! Port abstraction for ingredient persistence adapters.
//!
//! Every method takes the owner explicitly; adapters must never return rows
//! belonging to anyone else.
use async_trait::async_trait;

use crate::domain::{AssignmentFilter, Ingredient, IngredientId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ingredient repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// List the owner's ingredients by name, descending.
    ///
    /// With [`AssignmentFilter::AssignedOnly`] only ingredients referenced by one of
    /// the owner's recipes are returned, each at most once.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;

    /// Persist a new ingredient.
    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError>;

    /// Return the subset of `ids` owned by `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError>;
}
