//! Driving port for reading a user's tags.

use async_trait::async_trait;

use crate::domain::{AssignmentFilter, Error, Tag, UserId};

#[async_trait]
pub trait TagsQuery: Send + Sync {
    /// List tags owned by `owner`, name descending.
    async fn list_tags(&self, owner: &UserId, filter: AssignmentFilter) -> Result<Vec<Tag>, Error>;
}
