//! Driving port for creating tags.

use async_trait::async_trait;

use crate::domain::{Error, ItemName, Tag, UserId};

#[async_trait]
pub trait TagsCommand: Send + Sync {
    /// Create a tag owned by `owner`.
    async fn create_tag(&self, owner: &UserId, name: ItemName) -> Result<Tag, Error>;
}
