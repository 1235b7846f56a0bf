//! Tag and ingredient use-cases.
//!
//! Tags and ingredients follow identical rules: owner-scoped listing with an
//! optional assignment filter, and creation from a validated [`ItemName`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, IngredientsCommand, IngredientsQuery,
    TagRepository, TagRepositoryError, TagsCommand, TagsQuery,
};
use crate::domain::{AssignmentFilter, Error, Ingredient, ItemName, Tag, UserId};

/// Service implementing the tag and ingredient driving ports.
#[derive(Clone)]
pub struct RecipeAttributesService<T, I> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T, I> RecipeAttributesService<T, I> {
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }
}

pub(crate) fn map_tag_error(error: TagRepositoryError) -> Error {
    match error {
        TagRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("tag repository unavailable: {message}"))
        }
        TagRepositoryError::Query { message } => {
            Error::internal(format!("tag repository error: {message}"))
        }
    }
}

pub(crate) fn map_ingredient_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
    }
}

#[async_trait]
impl<T, I> TagsQuery for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn list_tags(&self, owner: &UserId, filter: AssignmentFilter) -> Result<Vec<Tag>, Error> {
        self.tags
            .list_for_owner(owner, filter)
            .await
            .map_err(map_tag_error)
    }
}

#[async_trait]
impl<T, I> TagsCommand for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn create_tag(&self, owner: &UserId, name: ItemName) -> Result<Tag, Error> {
        let tag = Tag::create(owner.clone(), name);
        self.tags.insert(&tag).await.map_err(map_tag_error)?;
        Ok(tag)
    }
}

#[async_trait]
impl<T, I> IngredientsQuery for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn list_ingredients(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Ingredient>, Error> {
        self.ingredients
            .list_for_owner(owner, filter)
            .await
            .map_err(map_ingredient_error)
    }
}

#[async_trait]
impl<T, I> IngredientsCommand for RecipeAttributesService<T, I>
where
    T: TagRepository,
    I: IngredientRepository,
{
    async fn create_ingredient(&self, owner: &UserId, name: ItemName) -> Result<Ingredient, Error> {
        let ingredient = Ingredient::create(owner.clone(), name);
        self.ingredients
            .insert(&ingredient)
            .await
            .map_err(map_ingredient_error)?;
        Ok(ingredient)
    }
}
