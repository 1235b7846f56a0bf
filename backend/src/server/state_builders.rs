//! Builds the HTTP state over PostgreSQL or the in-memory store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use recipe_api::domain::PasswordHasher;
use recipe_api::inbound::http::state::{HttpState, Repositories};
use recipe_api::outbound::memory::MemoryStore;
use recipe_api::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository,
    DieselUserRepository,
};

/// Diesel repositories sharing one pool.
fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselTagRepository,
    DieselIngredientRepository,
    DieselRecipeRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        tags: Arc::new(DieselTagRepository::new(pool.clone())),
        ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
    }
}

/// Wire the services over `pool`, or over a fresh in-memory store without one.
pub(crate) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    let hasher = PasswordHasher::default();
    let clock = Arc::new(DefaultClock);
    match pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            HttpState::from_repositories(diesel_repositories(pool), hasher, clock)
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            HttpState::from_repositories(
                Repositories::shared(Arc::new(MemoryStore::new())),
                hasher,
                clock,
            )
        }
    }
}
