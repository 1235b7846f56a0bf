//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Query`, `*Command`, [`LoginService`]) are called by inbound
//! adapters and implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod ingredient_repository;
mod ingredients_command;
mod ingredients_query;
mod login_service;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod tag_repository;
mod tags_command;
mod tags_query;
mod user_accounts_command;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
pub use ingredients_command::IngredientsCommand;
pub use ingredients_query::IngredientsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
pub use recipes_command::RecipesCommand;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{TagRepository, TagRepositoryError};
pub use tags_command::TagsCommand;
pub use tags_query::TagsQuery;
pub use user_accounts_command::{RegisterUserRequest, UserAccountsCommand};
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredUser, UserPersistenceError, UserRepository};
