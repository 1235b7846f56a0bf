//! Shared helpers for the HTTP integration tests.
//!
//! The app is assembled the way the server binary assembles it (trace
//! middleware, extractor error handlers, session middleware and health
//! probes) but over the in-memory store, so no database is needed.

use std::collections::HashMap;
use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::{DefaultClock, MockEnv};
use serde_json::{Value, json};

use recipe_api::Trace;
use recipe_api::domain::{PasswordHasher, TRACE_ID_HEADER};
use recipe_api::inbound::http::configure_api;
use recipe_api::inbound::http::error::configure_extractors;
use recipe_api::inbound::http::health::{HealthState, live, ready};
use recipe_api::inbound::http::session_config::{
    BuildMode, SESSION_COOKIE_NAME, SessionSettings, session_settings_from_env,
};
use recipe_api::inbound::http::state::{HttpState, Repositories};
use recipe_api::outbound::memory::MemoryStore;

pub const PASSWORD: &str = "testpass123";

/// Debug-mode session settings with an insecure cookie for plain HTTP tests.
pub fn session_settings() -> SessionSettings {
    let vars = HashMap::from([
        ("SESSION_COOKIE_SECURE", "0".to_owned()),
        ("SESSION_SAMESITE", "Lax".to_owned()),
        ("SESSION_ALLOW_EPHEMERAL", "1".to_owned()),
        ("SESSION_KEY_FILE", "/nonexistent/session_key".to_owned()),
    ]);
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    session_settings_from_env(&env, BuildMode::Debug).expect("debug session settings")
}

/// The full application over a fresh in-memory store.
pub fn app(
    health: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repositories(
        Repositories::shared(Arc::new(MemoryStore::new())),
        PasswordHasher::with_cost(4),
        Arc::new(DefaultClock),
    );
    App::new()
        .app_data(health)
        .app_data(web::Data::new(state))
        .configure(configure_extractors)
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session_settings().middleware())
                .configure(configure_api),
        )
        .service(ready)
        .service(live)
}

/// Response status, trace header and JSON body (`Null` when empty).
pub struct Captured {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub cookie: Option<Cookie<'static>>,
    pub body: Value,
}

/// Send `request` and capture the parts the tests assert on.
pub async fn send<S>(app: &S, request: Request) -> Captured
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Captured {
        status,
        trace_id,
        cookie,
        body,
    }
}

/// Register and log in `email`, returning the session cookie.
pub async fn sign_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let credentials = json!({ "email": email, "password": PASSWORD });
    let registered = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let logged_in = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(logged_in.status, StatusCode::OK);
    logged_in.cookie.expect("session cookie")
}

pub fn get(uri: &str, cookie: &Cookie<'static>) -> Request {
    test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request()
}

pub fn post(uri: &str, cookie: &Cookie<'static>, body: Value) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request()
}
