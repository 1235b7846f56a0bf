//! Driving port for creating ingredients.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, ItemName, UserId};

#[async_trait]
pub trait IngredientsCommand: Send + Sync {
    async fn create_ingredient(&self, owner: &UserId, name: ItemName) -> Result<Ingredient, Error>;
}
