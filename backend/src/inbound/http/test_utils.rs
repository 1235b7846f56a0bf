//! Helpers shared by the HTTP adapter's unit tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use crate::domain::PasswordHasher;
use crate::outbound::memory::MemoryStore;

use super::configure_api;
use super::error::configure_extractors;
use super::state::{HttpState, Repositories};

pub const SESSION_COOKIE: &str = "session";
pub const TEST_PASSWORD: &str = "testpass123";

/// Cookie session middleware with a fresh key and `Secure` disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Services over an empty in-memory store with a fast password hasher.
pub fn memory_state() -> HttpState {
    HttpState::from_repositories(
        Repositories::shared(Arc::new(MemoryStore::new())),
        PasswordHasher::with_cost(4),
        Arc::new(DefaultClock),
    )
}

/// The full `/api/v1` surface over a fresh in-memory store.
pub fn api_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(memory_state()))
        .configure(configure_extractors)
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Register `email` and return the session cookie from logging in.
pub async fn login_as<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let credentials = json!({ "email": email, "password": TEST_PASSWORD });
    let created = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED, "register {email}");

    let logged_in = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(logged_in.status(), StatusCode::OK, "login {email}");
    session_cookie(&logged_in).expect("login sets a session cookie")
}

/// Send `body` as JSON with the given session cookie.
pub async fn post_json_as<S>(app: &S, uri: &str, cookie: &Cookie<'static>, body: Value) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

/// `GET uri` with the given session cookie.
pub async fn get_as<S>(app: &S, uri: &str, cookie: &Cookie<'static>) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    actix_test::call_service(app, request).await
}
