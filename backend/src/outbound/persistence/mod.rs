//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and contain no
//! business logic. Connections come from a `bb8` pool through `diesel-async`;
//! row structs and the schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use recipe_api::outbound::persistence::{DbPool, DieselTagRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let tags = DieselTagRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_tag_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
