//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod ingredients;
pub mod items;
pub mod recipes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// Callers mount this inside a scope wrapped with the session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(tags::list_tags)
        .service(tags::create_tag)
        .service(ingredients::list_ingredients)
        .service(ingredients::create_ingredient)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::delete_recipe);
}
