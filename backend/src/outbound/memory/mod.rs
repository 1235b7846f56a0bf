//! Process-local store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Ownership and duplicate rules match the Diesel adapters. Names sort
//! bytewise, descending, with ties broken by id; the migrations declare the
//! name columns `COLLATE "C"` so PostgreSQL sorts the same way.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, RecipeRepository, RecipeRepositoryError,
    StoredUser, TagRepository, TagRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AssignmentFilter, Email, Ingredient, IngredientId, Recipe, RecipeFilter, RecipeId, Tag, TagId,
    User, UserId,
};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, StoredUser>,
    tags: HashMap<TagId, Tag>,
    ingredients: HashMap<IngredientId, Ingredient>,
    recipes: HashMap<RecipeId, Recipe>,
}

impl MemoryState {
    fn owned_recipes<'a>(&'a self, owner: &'a UserId) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes
            .values()
            .filter(move |recipe| recipe.user_id() == owner)
    }
}

/// Shared in-memory repository; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(
        &self,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<MutexGuard<'_, MemoryState>, E> {
        self.state
            .lock()
            .map_err(|_| poisoned("memory store lock poisoned"))
    }
}

fn sort_by_name_desc<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> (&str, K)) {
    items.sort_by(|left, right| key(right).cmp(&key(left)));
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, account: &StoredUser) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::connection)?;
        let email = account.user.email();
        if state
            .users
            .values()
            .any(|existing| existing.user.email() == email)
        {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        state
            .users
            .insert(account.user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::connection)?;
        Ok(state.users.get(id).map(|account| account.user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::connection)?;
        Ok(state
            .users
            .values()
            .find(|account| account.user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Tag>, TagRepositoryError> {
        let state = self.lock(TagRepositoryError::connection)?;
        let assigned: Option<BTreeSet<TagId>> = match filter {
            AssignmentFilter::All => None,
            AssignmentFilter::AssignedOnly => Some(
                state
                    .owned_recipes(owner)
                    .flat_map(|recipe| recipe.tag_ids().iter().copied())
                    .collect(),
            ),
        };
        let mut tags: Vec<Tag> = state
            .tags
            .values()
            .filter(|tag| tag.user_id() == owner)
            .filter(|tag| assigned.as_ref().is_none_or(|ids| ids.contains(&tag.id())))
            .cloned()
            .collect();
        sort_by_name_desc(&mut tags, |tag| (tag.name().as_ref(), tag.id()));
        Ok(tags)
    }

    async fn insert(&self, tag: &Tag) -> Result<(), TagRepositoryError> {
        let mut state = self.lock(TagRepositoryError::connection)?;
        state.tags.insert(tag.id(), tag.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, TagRepositoryError> {
        let state = self.lock(TagRepositoryError::connection)?;
        let wanted: BTreeSet<TagId> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| state.tags.get(&id))
            .filter(|tag| tag.user_id() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IngredientRepository for MemoryStore {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: AssignmentFilter,
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let state = self.lock(IngredientRepositoryError::connection)?;
        let assigned: Option<BTreeSet<IngredientId>> = match filter {
            AssignmentFilter::All => None,
            AssignmentFilter::AssignedOnly => Some(
                state
                    .owned_recipes(owner)
                    .flat_map(|recipe| recipe.ingredient_ids().iter().copied())
                    .collect(),
            ),
        };
        let mut ingredients: Vec<Ingredient> = state
            .ingredients
            .values()
            .filter(|ingredient| ingredient.user_id() == owner)
            .filter(|ingredient| {
                assigned
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&ingredient.id()))
            })
            .cloned()
            .collect();
        sort_by_name_desc(&mut ingredients, |ingredient| {
            (ingredient.name().as_ref(), ingredient.id())
        });
        Ok(ingredients)
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), IngredientRepositoryError> {
        let mut state = self.lock(IngredientRepositoryError::connection)?;
        state.ingredients.insert(ingredient.id(), ingredient.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let state = self.lock(IngredientRepositoryError::connection)?;
        let wanted: BTreeSet<IngredientId> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| state.ingredients.get(&id))
            .filter(|ingredient| ingredient.user_id() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock(RecipeRepositoryError::connection)?;
        let mut recipes: Vec<Recipe> = state
            .owned_recipes(owner)
            .filter(|recipe| filter.matches(recipe))
            .cloned()
            .collect();
        recipes.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(recipes)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock(RecipeRepositoryError::connection)?;
        Ok(state
            .recipes
            .get(&id)
            .filter(|recipe| recipe.user_id() == owner)
            .cloned())
    }

    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut state = self.lock(RecipeRepositoryError::connection)?;
        state.recipes.insert(recipe.id(), recipe.clone());
        Ok(())
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock(RecipeRepositoryError::connection)?;
        let owned = state
            .recipes
            .get(&id)
            .is_some_and(|recipe| recipe.user_id() == owner);
        if owned {
            state.recipes.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests;
