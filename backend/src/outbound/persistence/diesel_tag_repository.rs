//! PostgreSQL-backed `TagRepository`.
//!
//! The assigned-only listing is a single query: tags whose id appears in
//! `recipe_tags` joined to the owner's recipes. `IN (subquery)` keeps each tag
//! once no matter how many recipes reference it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TagRepository, TagRepositoryError};
use crate::domain::{AssignmentFilter, ItemName, Tag, TagId, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::TagRow;
use super::pool::DbPool;
use super::schema::{recipe_tags, recipes, tags};

/// Diesel implementation of [`TagRepository`].
#[derive(Clone)]
pub struct DieselTagRepository {
    pool: DbPool,
}

impl DieselTagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_tag(row: TagRow) -> Result<Tag, TagRepositoryError> {
    let name = ItemName::new(&row.name)
        .map_err(|err| TagRepositoryError::query(format!("stored tag name invalid: {err}")))?;
    Ok(Tag::new(
        TagId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        name,
    ))
}

#[async_trait]
impl TagRepository for DieselTagRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Tag>, TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_id = *owner.as_uuid();

        let mut query = tags::table
            .filter(tags::user_id.eq(owner_id))
            .select(TagRow::as_select())
            .order_by((tags::name.desc(), tags::id.desc()))
            .into_boxed();
        if filter == AssignmentFilter::AssignedOnly {
            let assigned = recipe_tags::table
                .inner_join(recipes::table)
                .filter(recipes::user_id.eq(owner_id))
                .select(recipe_tags::tag_id);
            query = query.filter(tags::id.eq_any(assigned));
        }

        let rows: Vec<TagRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tag).collect()
    }

    async fn insert(&self, tag: &Tag) -> Result<(), TagRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = TagRow {
            id: *tag.id().as_uuid(),
            user_id: *tag.user_id().as_uuid(),
            name: tag.name().as_ref().to_owned(),
        };
        diesel::insert_into(tags::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let wanted: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<TagRow> = tags::table
            .filter(tags::user_id.eq(owner.as_uuid()))
            .filter(tags::id.eq_any(wanted))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_tag).collect()
    }
}
