//! Recipes and the values they are built from.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Ingredient, IngredientId, Price, Tag, TagId, UserId};

/// Maximum length of a recipe title.
pub const RECIPE_TITLE_MAX: usize = 255;
/// Maximum length of a recipe link.
pub const RECIPE_LINK_MAX: usize = 255;
/// Largest preparation time storable in a signed 32-bit column.
pub const RECIPE_TIME_MAX_MINUTES: u32 = 2_147_483_647;

/// Validation errors for recipe text fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("link must be at most {max} characters")]
    LinkTooLong { max: usize },
    #[error("time_minutes must be at most {max}")]
    TimeTooLong { max: u32 },
}

/// Check a preparation time against [`RECIPE_TIME_MAX_MINUTES`].
pub fn validate_time_minutes(minutes: u32) -> Result<u32, RecipeValidationError> {
    if minutes > RECIPE_TIME_MAX_MINUTES {
        return Err(RecipeValidationError::TimeTooLong {
            max: RECIPE_TIME_MAX_MINUTES,
        });
    }
    Ok(minutes)
}

/// Stable recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
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

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Trimmed, non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > RECIPE_TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong {
                max: RECIPE_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional external link; blank input means no link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeLink(Option<String>);

impl RecipeLink {
    pub fn new(raw: Option<&str>) -> Result<Self, RecipeValidationError> {
        let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self(None));
        };
        if trimmed.chars().count() > RECIPE_LINK_MAX {
            return Err(RecipeValidationError::LinkTooLong {
                max: RECIPE_LINK_MAX,
            });
        }
        Ok(Self(Some(trimmed.to_owned())))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Caller-supplied content for a new recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: RecipeTitle,
    pub time_minutes: u32,
    pub price: Price,
    pub link: RecipeLink,
    pub tag_ids: BTreeSet<TagId>,
    pub ingredient_ids: BTreeSet<IngredientId>,
}

/// Recipe aggregate.
///
/// ## Invariants
/// - Tag and ingredient references are sets and belong to the same owner.
/// - Display is the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    user_id: UserId,
    title: RecipeTitle,
    time_minutes: u32,
    price: Price,
    link: RecipeLink,
    tag_ids: BTreeSet<TagId>,
    ingredient_ids: BTreeSet<IngredientId>,
    created_at: DateTime<Utc>,
}

impl Recipe {
    /// Materialise a draft for `owner` at `created_at`.
    pub fn from_draft(
        id: RecipeId,
        owner: UserId,
        draft: RecipeDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let RecipeDraft {
            title,
            time_minutes,
            price,
            link,
            tag_ids,
            ingredient_ids,
        } = draft;
        Self {
            id,
            user_id: owner,
            title,
            time_minutes,
            price,
            link,
            tag_ids,
            ingredient_ids,
            created_at,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    pub fn time_minutes(&self) -> u32 {
        self.time_minutes
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    pub fn ingredient_ids(&self) -> &BTreeSet<IngredientId> {
        &self.ingredient_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.title, f)
    }
}

/// Recipe together with its resolved tags and ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}
