//! End-to-end behaviour of the HTTP surface over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{test, web};
use rstest::rstest;
use serde_json::{Value, json};

use recipe_api::inbound::http::health::HealthState;
use support::{app, get, post, send, sign_in};

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_are_unauthorised_with_a_trace_id() {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;

    for uri in [
        "/api/v1/users/me",
        "/api/v1/tags",
        "/api/v1/ingredients",
        "/api/v1/recipes",
    ] {
        let captured = send(&service, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(captured.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(captured.body["code"], "unauthorized");
        let header = captured.trace_id.expect("trace-id header");
        assert_eq!(captured.body["traceId"], header.as_str());
    }
}

#[rstest]
#[case("/api/v1/tags", None)]
#[case("/api/v1/ingredients", Some("not json"))]
#[case("/api/v1/recipes", None)]
#[case("/api/v1/recipes", Some(r#"{"title":""}"#))]
#[actix_web::test]
async fn anonymous_writes_are_unauthorised_before_the_body_is_parsed(
    #[case] uri: &str,
    #[case] body: Option<&str>,
) {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;

    let mut request = test::TestRequest::post().uri(uri);
    if let Some(body) = body {
        request = request
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(body.to_owned());
    }
    let captured = send(&service, request.to_request()).await;
    assert_eq!(captured.status, StatusCode::UNAUTHORIZED);
    assert_eq!(captured.body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn a_cook_builds_and_filters_a_recipe_book() {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;
    let cookie = sign_in(&service, "cook@example.com").await;

    let vegan = send(&service, post("/api/v1/tags", &cookie, json!({"name": "Vegan"}))).await;
    assert_eq!(vegan.status, StatusCode::CREATED);
    let dessert = send(&service, post("/api/v1/tags", &cookie, json!({"name": "Dessert"}))).await;
    assert_eq!(dessert.status, StatusCode::CREATED);
    let kale = send(
        &service,
        post("/api/v1/ingredients", &cookie, json!({"name": "Kale"})),
    )
    .await;
    assert_eq!(kale.status, StatusCode::CREATED);

    let salad = send(
        &service,
        post(
            "/api/v1/recipes",
            &cookie,
            json!({
                "title": "Kale salad",
                "timeMinutes": 10,
                "price": "4.50",
                "tags": [vegan.body["id"].clone()],
                "ingredients": [kale.body["id"].clone()]
            }),
        ),
    )
    .await;
    assert_eq!(salad.status, StatusCode::CREATED);
    let cake = send(
        &service,
        post(
            "/api/v1/recipes",
            &cookie,
            json!({
                "title": "Chocolate cake",
                "timeMinutes": 60,
                "price": 12.5,
                "tags": [dessert.body["id"].clone()]
            }),
        ),
    )
    .await;
    assert_eq!(cake.status, StatusCode::CREATED);
    assert_eq!(cake.body["price"], "12.50");

    let tags = send(&service, get("/api/v1/tags", &cookie)).await;
    assert_eq!(names(&tags.body), ["Vegan", "Dessert"]);

    let vegan_id = vegan.body["id"].as_str().expect("tag id");
    let filtered = send(&service, get(&format!("/api/v1/recipes?tags={vegan_id}"), &cookie)).await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.body.as_array().map(Vec::len), Some(1));
    assert_eq!(filtered.body[0]["title"], "Kale salad");

    let kale_id = kale.body["id"].as_str().expect("ingredient id");
    let both = send(
        &service,
        get(
            &format!("/api/v1/recipes?tags={vegan_id}&ingredients={kale_id}"),
            &cookie,
        ),
    )
    .await;
    assert_eq!(both.body.as_array().map(Vec::len), Some(1));

    let assigned = send(&service, get("/api/v1/ingredients?assigned_only=1", &cookie)).await;
    assert_eq!(names(&assigned.body), ["Kale"]);
}

#[rstest]
#[actix_web::test]
async fn users_never_see_each_others_data() {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;
    let alice = sign_in(&service, "alice@example.com").await;
    let bob = sign_in(&service, "bob@example.com").await;

    let tag = send(&service, post("/api/v1/tags", &alice, json!({"name": "Secret"}))).await;
    let recipe = send(
        &service,
        post(
            "/api/v1/recipes",
            &alice,
            json!({"title": "Family stew", "timeMinutes": 90, "price": "8.00"}),
        ),
    )
    .await;
    assert_eq!(recipe.status, StatusCode::CREATED);

    let tags = send(&service, get("/api/v1/tags", &bob)).await;
    assert!(names(&tags.body).is_empty());
    let recipes = send(&service, get("/api/v1/recipes", &bob)).await;
    assert_eq!(recipes.body, json!([]));

    let id = recipe.body["id"].as_str().expect("recipe id");
    let detail = send(&service, get(&format!("/api/v1/recipes/{id}"), &bob)).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);

    let borrowed = send(
        &service,
        post(
            "/api/v1/recipes",
            &bob,
            json!({
                "title": "Borrowed stew",
                "timeMinutes": 90,
                "price": "8.00",
                "tags": [tag.body["id"].clone()]
            }),
        ),
    )
    .await;
    assert_eq!(borrowed.status, StatusCode::BAD_REQUEST);
    assert_eq!(borrowed.body["details"]["code"], "unknown_reference");
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session() {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;
    let cookie = sign_in(&service, "cook@example.com").await;

    let me = send(&service, get("/api/v1/users/me", &cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "cook@example.com");

    let out = send(&service, post("/api/v1/logout", &cookie, json!({}))).await;
    assert_eq!(out.status, StatusCode::NO_CONTENT);
    let cleared = out.cookie.expect("logout clears the cookie");
    assert!(cleared.value().is_empty());

    let after = send(&service, get("/api/v1/users/me", &cleared)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let service = test::init_service(app(web::Data::new(HealthState::new()))).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let captured = send(&service, request).await;
    assert_eq!(captured.status, StatusCode::BAD_REQUEST);
    assert_eq!(captured.body["code"], "invalid_request");
    assert_eq!(captured.body["details"]["code"], "invalid_body");
}

#[rstest]
#[actix_web::test]
async fn probes_report_health() {
    let health = web::Data::new(HealthState::new());
    let service = test::init_service(app(health.clone())).await;

    let not_ready = send(&service, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(not_ready.status, StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let ready = send(&service, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["status"], "ok");

    let live = send(&service, test::TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(live.status, StatusCode::OK);
}
