//! Tests for ingredient handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{api_app, get_as, login_as, post_json_as};

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &actix_web::cookie::Cookie<'static>,
    name: &str,
) -> Value {
    let response = post_json_as(app, "/api/v1/ingredients", cookie, json!({"name": name})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn listing_requires_login() {
    let app = actix_test::init_service(api_app()).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/ingredients")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn ingredients_are_owner_scoped_and_name_descending() {
    let app = actix_test::init_service(api_app()).await;
    let other = login_as(&app, "other@example.com").await;
    create(&app, &other, "Vinegar").await;

    let cookie = login_as(&app, "cook@example.com").await;
    create(&app, &cookie, "Kale").await;
    create(&app, &cookie, "Salt").await;

    let listed: Value =
        actix_test::read_body_json(get_as(&app, "/api/v1/ingredients", &cookie).await).await;
    let names: Vec<&str> = listed
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, ["Salt", "Kale"]);
}

#[rstest]
#[actix_web::test]
async fn blank_name_is_rejected() {
    let app = actix_test::init_service(api_app()).await;
    let cookie = login_as(&app, "cook@example.com").await;
    let response = post_json_as(&app, "/api/v1/ingredients", &cookie, json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(response).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["code"], "empty_name");
}

#[rstest]
#[actix_web::test]
async fn assigned_only_lists_each_ingredient_once() {
    let app = actix_test::init_service(api_app()).await;
    let cookie = login_as(&app, "cook@example.com").await;
    let eggs = create(&app, &cookie, "Eggs").await;
    create(&app, &cookie, "Cheese").await;

    for title in ["Eggs benedict", "Herb eggs"] {
        let recipe = json!({
            "title": title,
            "timeMinutes": 20,
            "price": 4,
            "ingredients": [eggs["id"].clone()]
        });
        let created = post_json_as(&app, "/api/v1/recipes", &cookie, recipe).await;
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let listed: Value = actix_test::read_body_json(
        get_as(&app, "/api/v1/ingredients?assigned_only=1", &cookie).await,
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], eggs["id"]);
}
