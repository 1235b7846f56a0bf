//! Names shared by tags and ingredients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a tag or ingredient name.
pub const ITEM_NAME_MAX: usize = 255;

/// Validation errors for [`ItemName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemNameValidationError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed, non-empty label for a tag or ingredient.
///
/// # Examples
/// ```
/// use recipe_api::domain::ItemName;
///
/// let name = ItemName::new("  Vegan ").expect("valid name");
/// assert_eq!(name.as_ref(), "Vegan");
/// assert!(ItemName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ItemNameValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ItemNameValidationError::Empty);
        }
        if trimmed.chars().count() > ITEM_NAME_MAX {
            return Err(ItemNameValidationError::TooLong { max: ITEM_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
