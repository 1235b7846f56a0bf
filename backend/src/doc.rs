//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api/v1` plus the health probes,
//! the shared error envelope and the session cookie security scheme. Swagger
//! UI serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::items::{CreateItemRequest, ItemResponse};
use crate::inbound::http::recipes::{CreateRecipeRequest, RecipeDetailResponse, RecipeSummary};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserResponse};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the recipe API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe API",
        description = "Session-authenticated recipe book: accounts, tags, ingredients and recipes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        CreateItemRequest,
        ItemResponse,
        CreateRecipeRequest,
        RecipeSummary,
        RecipeDetailResponse,
        ProbeStatus,
    )),
    tags(
        (name = "users", description = "Registration, login and the current user"),
        (name = "tags", description = "Recipe tags owned by the caller"),
        (name = "ingredients", description = "Ingredients owned by the caller"),
        (name = "recipes", description = "Recipes owned by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
