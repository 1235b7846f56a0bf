//! Recipe handlers.
//!
//! ```text
//! GET    /api/v1/recipes?tags=<uuid,...>&ingredients=<uuid,...>
//! POST   /api/v1/recipes {"title":"Porridge","timeMinutes":5,"price":"1.20","tags":["<uuid>"]}
//! GET    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Bodies are camelCase. `price` is accepted as a JSON string or number and
//! always returned as a two-decimal string.

use std::collections::BTreeSet;

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, IngredientId, Price, Recipe, RecipeDetails, RecipeDraft, RecipeFilter, RecipeId,
    RecipeLink, RecipeTitle, RecipeValidationError, TagId, validate_time_minutes,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::items::ItemResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, field_error, parse_uuid, parse_uuid_csv, required,
};

const TITLE: FieldName = FieldName::new("title");
const TIME_MINUTES: FieldName = FieldName::new("timeMinutes");
const PRICE: FieldName = FieldName::new("price");
const TAGS: FieldName = FieldName::new("tags");
const INGREDIENTS: FieldName = FieldName::new("ingredients");
const RECIPE_ID: FieldName = FieldName::new("id");

/// Filters for `GET /api/v1/recipes`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Comma-separated tag ids; recipes carrying any of them match.
    pub tags: Option<String>,
    /// Comma-separated ingredient ids; recipes using any of them match.
    pub ingredients: Option<String>,
}

/// Body for `POST /api/v1/recipes`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[schema(example = "Steak and mushroom sauce")]
    pub title: Option<String>,
    #[schema(example = 30)]
    pub time_minutes: Option<i64>,
    /// Decimal string or number with at most two decimal places.
    #[schema(value_type = String, example = "5.25")]
    pub price: Option<Value>,
    #[schema(example = "https://example.com/recipes/steak")]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Recipe as listed; tags and ingredients are ids.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: String,
    #[schema(example = "Steak and mushroom sauce")]
    pub title: String,
    #[schema(example = 30)]
    pub time_minutes: u32,
    #[schema(example = "5.25")]
    pub price: String,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().to_string(),
            title: recipe.title().to_string(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price().to_string(),
            link: recipe.link().map(str::to_owned),
            tags: recipe.tag_ids().iter().map(ToString::to_string).collect(),
            ingredients: recipe
                .ingredient_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Recipe with its tags and ingredients resolved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetailResponse {
    pub id: String,
    pub title: String,
    pub time_minutes: u32,
    pub price: String,
    pub link: Option<String>,
    pub tags: Vec<ItemResponse>,
    pub ingredients: Vec<ItemResponse>,
}

impl From<RecipeDetails> for RecipeDetailResponse {
    fn from(details: RecipeDetails) -> Self {
        let RecipeDetails {
            recipe,
            tags,
            ingredients,
        } = details;
        Self {
            id: recipe.id().to_string(),
            title: recipe.title().to_string(),
            time_minutes: recipe.time_minutes(),
            price: recipe.price().to_string(),
            link: recipe.link().map(str::to_owned),
            tags: tags.iter().map(ItemResponse::from).collect(),
            ingredients: ingredients.iter().map(ItemResponse::from).collect(),
        }
    }
}

fn map_recipe_validation_error(err: RecipeValidationError) -> Error {
    let (field, code) = match err {
        RecipeValidationError::EmptyTitle => (TITLE, "empty_title"),
        RecipeValidationError::TitleTooLong { .. } => (TITLE, "title_too_long"),
        RecipeValidationError::LinkTooLong { .. } => (FieldName::new("link"), "link_too_long"),
        RecipeValidationError::TimeTooLong { .. } => (TIME_MINUTES, "time_too_long"),
    };
    field_error(field.as_str(), code, err.to_string(), None)
}

fn parse_time_minutes(raw: i64) -> Result<u32, Error> {
    let minutes = u32::try_from(raw).map_err(|_| {
        field_error(
            TIME_MINUTES.as_str(),
            "invalid_time_minutes",
            "timeMinutes must be a non-negative integer",
            Some(("value", json!(raw))),
        )
    })?;
    validate_time_minutes(minutes).map_err(map_recipe_validation_error)
}

fn parse_price(raw: &Value) -> Result<Price, Error> {
    let text = match raw {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => {
            return Err(field_error(
                PRICE.as_str(),
                "invalid_price",
                "price must be a decimal string or number",
                Some(("value", other.clone())),
            ));
        }
    };
    text.parse::<Price>().map_err(|err| {
        field_error(
            PRICE.as_str(),
            "invalid_price",
            err.to_string(),
            Some(("value", raw.clone())),
        )
    })
}

fn parse_id_list<T>(
    raw: &[String],
    field: FieldName,
    wrap: fn(uuid::Uuid) -> T,
) -> Result<BTreeSet<T>, Error>
where
    T: Ord,
{
    raw.iter()
        .map(|value| parse_uuid(value, field).map(wrap))
        .collect()
}

fn parse_draft(body: CreateRecipeRequest) -> Result<RecipeDraft, Error> {
    let title = required(body.title, TITLE)?;
    let time_minutes = required(body.time_minutes, TIME_MINUTES)?;
    let price = required(body.price, PRICE)?;
    Ok(RecipeDraft {
        title: RecipeTitle::new(title).map_err(map_recipe_validation_error)?,
        time_minutes: parse_time_minutes(time_minutes)?,
        price: parse_price(&price)?,
        link: RecipeLink::new(body.link.as_deref()).map_err(map_recipe_validation_error)?,
        tag_ids: parse_id_list(&body.tags, TAGS, TagId::from_uuid)?,
        ingredient_ids: parse_id_list(&body.ingredients, INGREDIENTS, IngredientId::from_uuid)?,
    })
}

fn parse_filter(query: &RecipeListQuery) -> Result<RecipeFilter, Error> {
    Ok(RecipeFilter {
        tag_ids: parse_uuid_csv(query.tags.as_deref(), TAGS)?
            .into_iter()
            .map(TagId::from_uuid)
            .collect(),
        ingredient_ids: parse_uuid_csv(query.ingredients.as_deref(), INGREDIENTS)?
            .into_iter()
            .map(IngredientId::from_uuid)
            .collect(),
    })
}

fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    parse_uuid(raw, RECIPE_ID).map(RecipeId::from_uuid)
}

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [RecipeSummary]),
        (status = 400, description = "Malformed tag or ingredient ids", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<web::Json<Vec<RecipeSummary>>> {
    let owner = user.into_inner();
    let filter = parse_filter(&query)?;
    let recipes = state.recipes_query.list_recipes(&owner, filter).await?;
    Ok(web::Json(recipes.iter().map(RecipeSummary::from).collect()))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetailResponse),
        (status = 400, description = "Invalid field or unknown tag/ingredient", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = user.into_inner();
    let draft = parse_draft(payload.into_inner())?;
    let details = state.recipes.create_recipe(&owner, draft).await?;
    Ok(HttpResponse::Created().json(RecipeDetailResponse::from(details)))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such recipe for this user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = user.into_inner();
    let id = parse_recipe_id(&path)?;
    let details = state.recipes_query.recipe_details(&owner, id).await?;
    Ok(web::Json(RecipeDetailResponse::from(details)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such recipe for this user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = user.into_inner();
    let id = parse_recipe_id(&path)?;
    state.recipes.delete_recipe(&owner, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
