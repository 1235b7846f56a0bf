//! Recipe use-cases: listing, detail, creation and deletion.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    IngredientRepository, RecipeRepository, RecipeRepositoryError, RecipesCommand, RecipesQuery,
    TagRepository,
};
use crate::domain::recipe_attributes_service::{map_ingredient_error, map_tag_error};
use crate::domain::{
    Error, Ingredient, IngredientId, Recipe, RecipeDetails, RecipeDraft, RecipeFilter, RecipeId,
    Tag, TagId, UserId,
};

/// Recipe service implementing the recipe driving ports.
#[derive(Clone)]
pub struct RecipesService<R, T, I> {
    recipes: Arc<R>,
    tags: Arc<T>,
    ingredients: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<R, T, I> RecipesService<R, T, I> {
    /// Create a service; `clock` stamps new recipes for newest-first ordering.
    pub fn new(
        recipes: Arc<R>,
        tags: Arc<T>,
        ingredients: Arc<I>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipes,
            tags,
            ingredients,
            clock,
        }
    }
}

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

fn recipe_not_found() -> Error {
    Error::not_found("recipe not found")
}

fn unknown_reference(field: &str, missing: Vec<String>) -> Error {
    Error::invalid_request(format!("{field} must reference your own {field}")).with_details(
        json!({
            "field": field,
            "code": "unknown_reference",
            "value": missing,
        }),
    )
}

impl<R, T, I> RecipesService<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    async fn owned_tags(&self, owner: &UserId, ids: &[TagId]) -> Result<Vec<Tag>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut tags = self
            .tags
            .find_owned(owner, ids)
            .await
            .map_err(map_tag_error)?;
        tags.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tags)
    }

    async fn owned_ingredients(
        &self,
        owner: &UserId,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut ingredients = self
            .ingredients
            .find_owned(owner, ids)
            .await
            .map_err(map_ingredient_error)?;
        ingredients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(ingredients)
    }

    async fn resolve(&self, owner: &UserId, recipe: Recipe) -> Result<RecipeDetails, Error> {
        let tag_ids: Vec<TagId> = recipe.tag_ids().iter().copied().collect();
        let ingredient_ids: Vec<IngredientId> = recipe.ingredient_ids().iter().copied().collect();
        let tags = self.owned_tags(owner, &tag_ids).await?;
        let ingredients = self.owned_ingredients(owner, &ingredient_ids).await?;
        Ok(RecipeDetails {
            recipe,
            tags,
            ingredients,
        })
    }
}

#[async_trait]
impl<R, T, I> RecipesQuery for RecipesService<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    async fn list_recipes(
        &self,
        owner: &UserId,
        filter: RecipeFilter,
    ) -> Result<Vec<Recipe>, Error> {
        self.recipes
            .list_for_owner(owner, &filter)
            .await
            .map_err(map_recipe_error)
    }

    async fn recipe_details(&self, owner: &UserId, id: RecipeId) -> Result<RecipeDetails, Error> {
        let recipe = self
            .recipes
            .find_owned(owner, id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(recipe_not_found)?;
        self.resolve(owner, recipe).await
    }
}

#[async_trait]
impl<R, T, I> RecipesCommand for RecipesService<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    async fn create_recipe(
        &self,
        owner: &UserId,
        draft: RecipeDraft,
    ) -> Result<RecipeDetails, Error> {
        let tag_ids: Vec<TagId> = draft.tag_ids.iter().copied().collect();
        let tags = self.owned_tags(owner, &tag_ids).await?;
        if tags.len() != tag_ids.len() {
            let missing = tag_ids
                .iter()
                .filter(|id| !tags.iter().any(|tag| tag.id() == **id))
                .map(ToString::to_string)
                .collect();
            return Err(unknown_reference("tags", missing));
        }

        let ingredient_ids: Vec<IngredientId> = draft.ingredient_ids.iter().copied().collect();
        let ingredients = self.owned_ingredients(owner, &ingredient_ids).await?;
        if ingredients.len() != ingredient_ids.len() {
            let missing = ingredient_ids
                .iter()
                .filter(|id| !ingredients.iter().any(|item| item.id() == **id))
                .map(ToString::to_string)
                .collect();
            return Err(unknown_reference("ingredients", missing));
        }

        let recipe = Recipe::from_draft(RecipeId::random(), owner.clone(), draft, self.clock.utc());
        self.recipes
            .insert(&recipe)
            .await
            .map_err(map_recipe_error)?;
        Ok(RecipeDetails {
            recipe,
            tags,
            ingredients,
        })
    }

    async fn delete_recipe(&self, owner: &UserId, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .recipes
            .delete_owned(owner, id)
            .await
            .map_err(map_recipe_error)?;
        if deleted {
            Ok(())
        } else {
            Err(recipe_not_found())
        }
    }
}

#[cfg(test)]
#[path = "recipes_service_tests.rs"]
mod tests;
