//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they can be exercised without a database.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    IngredientRepository, IngredientsCommand, IngredientsQuery, LoginService, RecipeRepository,
    RecipesCommand, RecipesQuery, TagRepository, TagsCommand, TagsQuery, UserAccountsCommand,
    UserProfileQuery, UserRepository,
};
use crate::domain::{PasswordHasher, RecipeAttributesService, RecipesService, UserAccountsService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountsCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub tags: Arc<dyn TagsCommand>,
    pub tags_query: Arc<dyn TagsQuery>,
    pub ingredients: Arc<dyn IngredientsCommand>,
    pub ingredients_query: Arc<dyn IngredientsQuery>,
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
}

/// Driven adapters the services are built on.
pub struct Repositories<U, T, I, R> {
    pub users: Arc<U>,
    pub tags: Arc<T>,
    pub ingredients: Arc<I>,
    pub recipes: Arc<R>,
}

impl<S> Repositories<S, S, S, S> {
    /// Use one adapter value for every port, as the in-memory store does.
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            users: Arc::clone(&store),
            tags: Arc::clone(&store),
            ingredients: Arc::clone(&store),
            recipes: store,
        }
    }
}

impl HttpState {
    /// Wire the domain services over `repos`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recipe_api::domain::PasswordHasher;
    /// use recipe_api::inbound::http::state::{HttpState, Repositories};
    /// use recipe_api::outbound::memory::MemoryStore;
    ///
    /// let repos = Repositories::shared(Arc::new(MemoryStore::new()));
    /// let hasher = PasswordHasher::default();
    /// let state = HttpState::from_repositories(repos, hasher, Arc::new(DefaultClock));
    /// let _tags = state.tags_query.clone();
    /// ```
    pub fn from_repositories<U, T, I, R>(
        repos: Repositories<U, T, I, R>,
        hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        T: TagRepository + 'static,
        I: IngredientRepository + 'static,
        R: RecipeRepository + 'static,
    {
        let Repositories {
            users,
            tags,
            ingredients,
            recipes,
        } = repos;

        let accounts = Arc::new(UserAccountsService::new(users, hasher));
        let attributes = Arc::new(RecipeAttributesService::new(
            Arc::clone(&tags),
            Arc::clone(&ingredients),
        ));
        let recipe_service = Arc::new(RecipesService::new(recipes, tags, ingredients, clock));

        Self {
            login: accounts.clone(),
            accounts: accounts.clone(),
            profile: accounts,
            tags: attributes.clone(),
            tags_query: attributes.clone(),
            ingredients: attributes.clone(),
            ingredients_query: attributes,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
        }
    }
}
