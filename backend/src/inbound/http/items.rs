//! Request and response shapes shared by the tag and ingredient endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AssignmentFilter, Error, Ingredient, ItemName, Tag};

use super::validation::{FieldName, invalid_assigned_only_error, parse_item_name, required};

const NAME: FieldName = FieldName::new("name");

/// Listing query for `GET /tags` and `GET /ingredients`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignmentQuery {
    /// Integer flag; non-zero keeps only items used by one of your recipes.
    #[param(example = "1")]
    pub assigned_only: Option<String>,
}

impl AssignmentQuery {
    pub(crate) fn filter(&self) -> Result<AssignmentFilter, Error> {
        AssignmentFilter::from_flag(self.assigned_only.as_deref())
            .map_err(|err| invalid_assigned_only_error(&err.value))
    }
}

/// Body for creating a tag or ingredient.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateItemRequest {
    #[schema(example = "Vegan")]
    pub name: Option<String>,
}

impl CreateItemRequest {
    pub(crate) fn into_name(self) -> Result<ItemName, Error> {
        let raw = required(self.name, NAME)?;
        parse_item_name(&raw, NAME)
    }
}

/// A tag or ingredient as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Vegan")]
    pub name: String,
}

impl From<&Tag> for ItemResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().to_string(),
            name: tag.name().to_string(),
        }
    }
}

impl From<&Ingredient> for ItemResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id().to_string(),
            name: ingredient.name().to_string(),
        }
    }
}
