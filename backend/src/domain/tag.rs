//! Tags owned by a user and attached to recipes.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ItemName, UserId};

/// Stable tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(Uuid);

impl TagId {
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

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Tag aggregate.
///
/// ## Invariants
/// - Every tag has exactly one owner; listings never cross owners.
/// - Display is the name.
///
/// # Examples
/// ```
/// use recipe_api::domain::{ItemName, Tag, UserId};
///
/// let tag = Tag::create(UserId::random(), ItemName::new("Vegan").unwrap());
/// assert_eq!(tag.to_string(), "Vegan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    user_id: UserId,
    name: ItemName,
}

impl Tag {
    /// Rehydrate a tag with a known identifier.
    pub fn new(id: TagId, user_id: UserId, name: ItemName) -> Self {
        Self { id, user_id, name }
    }

    /// Create a fresh tag for `owner` with a random identifier.
    pub fn create(owner: UserId, name: ItemName) -> Self {
        Self::new(TagId::random(), owner, name)
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
