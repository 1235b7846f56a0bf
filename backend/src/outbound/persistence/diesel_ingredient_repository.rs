//! PostgreSQL-backed `IngredientRepository`.
//!
//! Mirrors the tag adapter: assigned-only listing keeps ingredients whose id
//! appears in `recipe_ingredients` for one of the owner's recipes, each once.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{AssignmentFilter, Ingredient, IngredientId, ItemName, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::IngredientRow;
use super::pool::DbPool;
use super::schema::{ingredients, recipe_ingredients, recipes};

/// Diesel implementation of [`IngredientRepository`].
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, IngredientRepositoryError> {
    let name = ItemName::new(&row.name).map_err(|err| {
        IngredientRepositoryError::query(format!("stored ingredient name invalid: {err}"))
    })?;
    Ok(Ingredient::new(
        IngredientId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        name,
    ))
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_id = *owner.as_uuid();

        let mut query = ingredients::table
            .filter(ingredients::user_id.eq(owner_id))
            .select(IngredientRow::as_select())
            .order_by((ingredients::name.desc(), ingredients::id.desc()))
            .into_boxed();
        if filter == AssignmentFilter::AssignedOnly {
            let assigned = recipe_ingredients::table
                .inner_join(recipes::table)
                .filter(recipes::user_id.eq(owner_id))
                .select(recipe_ingredients::ingredient_id);
            query = query.filter(ingredients::id.eq_any(assigned));
        }

        let rows: Vec<IngredientRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_ingredient).collect()
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = IngredientRow {
            id: *ingredient.id().as_uuid(),
            user_id: *ingredient.user_id().as_uuid(),
            name: ingredient.name().as_ref().to_owned(),
        };
        diesel::insert_into(ingredients::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let wanted: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::user_id.eq(owner.as_uuid()))
            .filter(ingredients::id.eq_any(wanted))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_ingredient).collect()
    }
}
