//! Tag handlers.
//!
//! ```text
//! GET  /api/v1/tags?assigned_only=1
//! POST /api/v1/tags {"name":"Vegan"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::items::{AssignmentQuery, CreateItemRequest, ItemResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// List the caller's tags, name descending.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Tags owned by the caller", body = [ItemResponse]),
        (status = 400, description = "Invalid assigned_only flag", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<AssignmentQuery>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let owner = user.into_inner();
    let filter = query.filter()?;
    let tags = state.tags_query.list_tags(&owner, filter).await?;
    Ok(web::Json(tags.iter().map(ItemResponse::from).collect()))
}

/// Create a tag owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Tag created", body = ItemResponse),
        (status = 400, description = "Missing or invalid name", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let owner = user.into_inner();
    let name = payload.into_inner().into_name()?;
    let tag = state.tags.create_tag(&owner, name).await?;
    Ok(HttpResponse::Created().json(ItemResponse::from(&tag)))
}
