//! Ingredient handlers.
//!
//! ```text
//! GET  /api/v1/ingredients?assigned_only=1
//! POST /api/v1/ingredients {"name":"Salt"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::items::{AssignmentQuery, CreateItemRequest, ItemResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// List the caller's ingredients, name descending.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Ingredients owned by the caller", body = [ItemResponse]),
        (status = 400, description = "Invalid assigned_only flag", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<AssignmentQuery>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let owner = user.into_inner();
    let filter = query.filter()?;
    let ingredients = state.ingredients_query.list_ingredients(&owner, filter).await?;
    Ok(web::Json(ingredients.iter().map(ItemResponse::from).collect()))
}

/// Create an ingredient owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Ingredient created", body = ItemResponse),
        (status = 400, description = "Missing or invalid name", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let owner = user.into_inner();
    let name = payload.into_inner().into_name()?;
    let ingredient = state.ingredients.create_ingredient(&owner, name).await?;
    Ok(HttpResponse::Created().json(ItemResponse::from(&ingredient)))
}

#[cfg(test)]
mod tests;
