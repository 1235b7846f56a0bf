//! Ingredients owned by a user and referenced by recipes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ItemName, UserId};

/// Stable ingredient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(Uuid);

impl IngredientId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Ingredient aggregate; same ownership rules as [`super::Tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: IngredientId,
    user_id: UserId,
    name: ItemName,
}

impl Ingredient {
    pub fn new(id: IngredientId, user_id: UserId, name: ItemName) -> Self {
        Self { id, user_id, name }
    }

    /// Create a fresh ingredient for `owner` with a random identifier.
    pub fn create(owner: UserId, name: ItemName) -> Self {
        Self::new(IngredientId::random(), owner, name)
    }

    pub fn id(&self) -> IngredientId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_displays_as_name() {
        let name = ItemName::new("Cucumber").expect("valid name");
        let ingredient = Ingredient::create(UserId::random(), name);
        assert_eq!(ingredient.to_string(), "Cucumber");
    }
}
