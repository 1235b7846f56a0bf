//! PostgreSQL-backed `RecipeRepository`.
//!
//! Recipes and their link rows are written in one transaction. Reads load the
//! recipe rows first and then the link rows for exactly those recipes, so a
//! listing costs three queries regardless of its length.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    IngredientId, Price, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeLink, RecipeTitle,
    TagId, UserId,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{RecipeIngredientRow, RecipeRow, RecipeTagRow};
use super::pool::DbPool;
use super::schema::{recipe_ingredients, recipe_tags, recipes};

/// Diesel implementation of [`RecipeRepository`].
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(Default)]
struct RecipeLinks {
    tags: HashMap<Uuid, BTreeSet<TagId>>,
    ingredients: HashMap<Uuid, BTreeSet<IngredientId>>,
}

impl RecipeLinks {
    fn take(&mut self, recipe_id: &Uuid) -> (BTreeSet<TagId>, BTreeSet<IngredientId>) {
        (
            self.tags.remove(recipe_id).unwrap_or_default(),
            self.ingredients.remove(recipe_id).unwrap_or_default(),
        )
    }
}

fn row_to_recipe(
    row: RecipeRow,
    tag_ids: BTreeSet<TagId>,
    ingredient_ids: BTreeSet<IngredientId>,
) -> Result<Recipe, RecipeRepositoryError> {
    let corrupt = |field: &str, detail: String| {
        RecipeRepositoryError::query(format!("stored recipe {field} invalid: {detail}"))
    };
    let title = RecipeTitle::new(&row.title).map_err(|err| corrupt("title", err.to_string()))?;
    let time_minutes =
        u32::try_from(row.time_minutes).map_err(|err| corrupt("time", err.to_string()))?;
    let cents = u32::try_from(row.price_cents).map_err(|err| corrupt("price", err.to_string()))?;
    let price = Price::from_cents(cents).map_err(|err| corrupt("price", err.to_string()))?;
    let link =
        RecipeLink::new(row.link.as_deref()).map_err(|err| corrupt("link", err.to_string()))?;

    let draft = RecipeDraft {
        title,
        time_minutes,
        price,
        link,
        tag_ids,
        ingredient_ids,
    };
    Ok(Recipe::from_draft(
        RecipeId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        draft,
        row.created_at,
    ))
}

fn recipe_to_row(recipe: &Recipe) -> Result<RecipeRow, RecipeRepositoryError> {
    let overflow = |field: &str| RecipeRepositoryError::query(format!("{field} out of range"));
    Ok(RecipeRow {
        id: *recipe.id().as_uuid(),
        user_id: *recipe.user_id().as_uuid(),
        title: recipe.title().as_ref().to_owned(),
        time_minutes: i32::try_from(recipe.time_minutes())
            .map_err(|_| overflow("time_minutes"))?,
        price_cents: i32::try_from(recipe.price().cents()).map_err(|_| overflow("price"))?,
        link: recipe.link().map(str::to_owned),
        created_at: recipe.created_at(),
    })
}

async fn load_links(
    conn: &mut AsyncPgConnection,
    recipe_ids: &[Uuid],
) -> Result<RecipeLinks, DieselError> {
    let mut links = RecipeLinks::default();
    if recipe_ids.is_empty() {
        return Ok(links);
    }

    let tag_rows: Vec<RecipeTagRow> = recipe_tags::table
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .select(RecipeTagRow::as_select())
        .load(conn)
        .await?;
    for row in tag_rows {
        links
            .tags
            .entry(row.recipe_id)
            .or_default()
            .insert(TagId::from_uuid(row.tag_id));
    }

    let ingredient_rows: Vec<RecipeIngredientRow> = recipe_ingredients::table
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select(RecipeIngredientRow::as_select())
        .load(conn)
        .await?;
    for row in ingredient_rows {
        links
            .ingredients
            .entry(row.recipe_id)
            .or_default()
            .insert(IngredientId::from_uuid(row.ingredient_id));
    }

    Ok(links)
}

fn assemble(
    rows: Vec<RecipeRow>,
    mut links: RecipeLinks,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    rows.into_iter()
        .map(|row| {
            let (tag_ids, ingredient_ids) = links.take(&row.id);
            row_to_recipe(row, tag_ids, ingredient_ids)
        })
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = recipes::table
            .filter(recipes::user_id.eq(*owner.as_uuid()))
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.desc(), recipes::id.desc()))
            .into_boxed();
        if !filter.tag_ids.is_empty() {
            let wanted: Vec<Uuid> = filter.tag_ids.iter().map(|id| *id.as_uuid()).collect();
            let tagged = recipe_tags::table
                .filter(recipe_tags::tag_id.eq_any(wanted))
                .select(recipe_tags::recipe_id);
            query = query.filter(recipes::id.eq_any(tagged));
        }
        if !filter.ingredient_ids.is_empty() {
            let wanted: Vec<Uuid> = filter
                .ingredient_ids
                .iter()
                .map(|id| *id.as_uuid())
                .collect();
            let containing = recipe_ingredients::table
                .filter(recipe_ingredients::ingredient_id.eq_any(wanted))
                .select(recipe_ingredients::recipe_id);
            query = query.filter(recipes::id.eq_any(containing));
        }

        let rows: Vec<RecipeRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        let recipe_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let links = load_links(&mut conn, &recipe_ids)
            .await
            .map_err(map_diesel_error)?;
        assemble(rows, links)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(*id.as_uuid()))
            .filter(recipes::user_id.eq(*owner.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut links = load_links(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        let (tag_ids, ingredient_ids) = links.take(&row.id);
        row_to_recipe(row, tag_ids, ingredient_ids).map(Some)
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let row = recipe_to_row(recipe)?;
        let tag_rows: Vec<RecipeTagRow> = recipe
            .tag_ids()
            .iter()
            .map(|tag_id| RecipeTagRow {
                recipe_id: row.id,
                tag_id: *tag_id.as_uuid(),
            })
            .collect();
        let ingredient_rows: Vec<RecipeIngredientRow> = recipe
            .ingredient_ids()
            .iter()
            .map(|ingredient_id| RecipeIngredientRow {
                recipe_id: row.id,
                ingredient_id: *ingredient_id.as_uuid(),
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::insert_into(recipes::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                if !tag_rows.is_empty() {
                    diesel::insert_into(recipe_tags::table)
                        .values(&tag_rows)
                        .execute(conn)
                        .await?;
                }
                if !ingredient_rows.is_empty() {
                    diesel::insert_into(recipe_ingredients::table)
                        .values(&ingredient_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = recipes::table
            .filter(recipes::id.eq(*id.as_uuid()))
            .filter(recipes::user_id.eq(*owner.as_uuid()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
