//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define the recipe book's strongly typed entities and the
//! use-cases that operate on them, independent of HTTP or SQL. Value types
//! validate on construction so adapters cannot build invalid state.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Tag, Ingredient, Recipe: aggregates, each owned by a user.
//! - AssignmentFilter / RecipeFilter: listing constraints.
//! - UserAccountsService, RecipeAttributesService, RecipesService: services
//!   implementing the driving ports in [`ports`].

pub mod auth;
pub mod error;
pub mod ingredient;
pub mod item_name;
pub mod listing;
pub mod password_hash;
pub mod ports;
pub mod price;
pub mod recipe;
pub mod recipe_attributes_service;
pub mod recipes_service;
pub mod tag;
pub mod trace_id;
pub mod user;
pub mod user_accounts_service;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Password, PasswordValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ingredient::{Ingredient, IngredientId};
pub use self::item_name::{ITEM_NAME_MAX, ItemName, ItemNameValidationError};
pub use self::listing::{AssignmentFilter, AssignmentFilterParseError, RecipeFilter};
pub use self::password_hash::{PasswordHash, PasswordHashError, PasswordHasher};
pub use self::price::{Price, PriceValidationError};
pub use self::recipe::{
    RECIPE_TIME_MAX_MINUTES, Recipe, RecipeDetails, RecipeDraft, RecipeId, RecipeLink, RecipeTitle,
    RecipeValidationError, validate_time_minutes,
};
pub use self::recipe_attributes_service::RecipeAttributesService;
pub use self::recipes_service::RecipesService;
pub use self::tag::{Tag, TagId};
pub use self::trace_id::TraceId;
pub use self::user::{
    AccountRole, Email, User, UserFlags, UserId, UserName, UserValidationError,
};
pub use self::user_accounts_service::UserAccountsService;
