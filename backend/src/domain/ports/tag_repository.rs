//! Port abstraction for tag persistence adapters.
//!
//! Every method takes the owner explicitly; adapters must never return rows
//! belonging to anyone else.
use async_trait::async_trait;

use crate::domain::{AssignmentFilter, Tag, TagId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by tag repository adapters.
    pub enum TagRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "tag repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "tag repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List the owner's tags by name, descending.
    ///
    /// With [`AssignmentFilter::AssignedOnly`] only tags referenced by one of
    /// the owner's recipes are returned, each at most once.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Tag>, TagRepositoryError>;

    /// Persist a new tag.
    async fn insert(&self, tag: &Tag) -> Result<(), TagRepositoryError>;

    /// Return the subset of `ids` owned by `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagRepositoryError>;
}
