//! Cookie sessions as seen by handlers.
//!
//! [`SessionContext`] stores and reads the signed-in [`UserId`].
//! [`AuthenticatedUser`] is the gate for owner-scoped endpoints: it fails
//! extraction with 401, so it must precede `Json`/`Query` arguments.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Authenticated-session view over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user_id` as the session owner, rotating the session id.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// The session owner, if any. A tampered or stale id reads as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match UserId::new(&raw) {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                warn!(error = %err, "discarding invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// The session owner or `401 login required`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Forget the session entirely; the client receives an expired cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// The signed-in caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let user_id = session.require_user_id()?;
            Ok(Self(user_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(FIXTURE_ID).map_err(|err| Error::internal(err.to_string()))?;
        session.persist_user(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn echo(user: AuthenticatedUser, body: web::Json<serde_json::Value>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "owner": user.into_inner().to_string(),
            "body": body.into_inner(),
        }))
    }

    async fn sign_out(session: SessionContext) -> HttpResponse {
        session.purge();
        HttpResponse::NoContent().finish()
    }

    async fn corrupt(session: Session) -> HttpResponse {
        match session.insert(USER_ID_KEY, "not-a-uuid") {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn call(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        cookie: Option<Cookie<'static>>,
    ) -> actix_web::dev::ServiceResponse {
        let mut request = test::TestRequest::get().uri(uri);
        if let Some(cookie) = cookie {
            request = request.cookie(cookie);
        }
        test::call_service(app, request.to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn session_round_trips_and_purges() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/login", web::get().to(sign_in))
                .route("/me", web::get().to(whoami))
                .route("/logout", web::get().to(sign_out)),
        )
        .await;

        let login = call(&app, "/login", None).await;
        let cookie = session_cookie(&login).expect("session cookie set");

        let me = call(&app, "/me", Some(cookie.clone())).await;
        assert_eq!(me.status(), StatusCode::OK);
        assert_eq!(test::read_body(me).await, FIXTURE_ID);

        let logout = call(&app, "/logout", Some(cookie)).await;
        let cleared = session_cookie(&logout).expect("removal cookie set");
        assert!(cleared.value().is_empty());
    }

    #[rstest]
    #[case::anonymous(false)]
    #[case::tampered(true)]
    #[actix_web::test]
    async fn unusable_sessions_are_unauthorised(#[case] tamper: bool) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/corrupt", web::get().to(corrupt))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let cookie = if tamper {
            let response = call(&app, "/corrupt", None).await;
            session_cookie(&response)
        } else {
            None
        };

        let me = call(&app, "/me", cookie).await;
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case::no_body(None)]
    #[case::not_json(Some("not json"))]
    #[case::valid_json(Some("{\"name\":\"Vegan\"}"))]
    #[actix_web::test]
    async fn anonymous_callers_are_refused_before_the_body_is_read(#[case] body: Option<&str>) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let mut request = test::TestRequest::post().uri("/echo");
        if let Some(body) = body {
            request = request
                .insert_header((actix_web::http::header::CONTENT_TYPE, "application/json"))
                .set_payload(body.to_owned());
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn authenticated_user_carries_the_session_owner() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/login", web::get().to(sign_in))
                .route("/echo", web::post().to(echo)),
        )
        .await;
        let login = call(&app, "/login", None).await;
        let cookie = session_cookie(&login).expect("session cookie set");

        let request = test::TestRequest::post()
            .uri("/echo")
            .cookie(cookie)
            .set_json(serde_json::json!({"name": "Vegan"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["owner"], FIXTURE_ID);
        assert_eq!(body["body"]["name"], "Vegan");
    }
}
