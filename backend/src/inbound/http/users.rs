//! Account handlers: registration, login, logout and the current user.
//!
//! ```text
//! POST /api/v1/users   {"email":"cook@example.com","password":"secret","name":"Cook"}
//! POST /api/v1/login   {"email":"cook@example.com","password":"secret"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{
    AccountRole, Email, Error, LoginCredentials, LoginValidationError, Password,
    PasswordValidationError, User, UserName, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{AuthenticatedUser, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, field_error, required};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

/// Registration body for `POST /api/v1/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "cook@example.com")]
    pub email: Option<String>,
    #[schema(example = "testpass123")]
    pub password: Option<String>,
    #[schema(example = "Test Cook")]
    pub name: Option<String>,
}

/// Login body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "cook@example.com")]
    pub email: String,
    #[schema(example = "testpass123")]
    pub password: String,
}

/// Public view of an account; never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "cook@example.com")]
    pub email: String,
    #[schema(example = "Test Cook")]
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().as_ref().to_owned(),
        }
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
        UserValidationError::NameTooLong { .. } => ("name", "name_too_long"),
        UserValidationError::InvalidEmail
        | UserValidationError::EmptyId
        | UserValidationError::InvalidId => ("email", "invalid_email"),
    };
    field_error(field, code, err.to_string(), None)
}

fn map_password_error(err: PasswordValidationError) -> Error {
    match err {
        PasswordValidationError::TooShort { min } => field_error(
            PASSWORD.as_str(),
            "password_too_short",
            err.to_string(),
            Some(("min", json!(min))),
        ),
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn parse_registration(body: RegisterRequest) -> Result<RegisterUserRequest, Error> {
    let email = required(body.email, EMAIL)?;
    let password = required(body.password, PASSWORD)?;
    Ok(RegisterUserRequest {
        email: Email::new(&email).map_err(map_user_validation_error)?,
        password: Password::new(&password).map_err(map_password_error)?,
        name: UserName::new(body.name.unwrap_or_default()).map_err(map_user_validation_error)?,
        role: AccountRole::Regular,
    })
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid email, password or name", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_registration(payload.into_inner())?;
    let user = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank email or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session; succeeds without one.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = user.into_inner();
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(UserResponse::from(user)))
}
