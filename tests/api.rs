use std::sync::Arc;

use actix_web::{
    App,
    dev::ServiceResponse,
    http::{StatusCode, header},
    test,
};
use contribution_tracker::{
    metrics::{cleared_total, pending_total, remaining_to_goal},
    models::contribution::Contribution,
    repository::MemoryContributionStore,
    routes,
    services::contributions::ContributionService,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn service() -> ContributionService {
    ContributionService::new(Arc::new(MemoryContributionStore::new()))
}

macro_rules! app {
    () => {
        test::init_service(App::new().configure(routes::app_config(service()))).await
    };
}

macro_rules! send {
    ($app:expr, $request:expr) => {
        parts(test::call_service(&$app, $request.to_request()).await)
    };
}

async fn parts(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

fn create(body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/contributors")
        .set_json(body)
}

fn patch(id: &str, body: Value) -> test::TestRequest {
    test::TestRequest::patch()
        .uri(&format!("/api/contributors/{id}"))
        .set_json(body)
}

fn list() -> test::TestRequest {
    test::TestRequest::get().uri("/api/contributors")
}

fn delete(id: &str) -> test::TestRequest {
    test::TestRequest::delete().uri(&format!("/api/contributors/{id}"))
}

#[actix_web::test]
async fn fundraising_scenario() {
    let app = app!();
    let goal = dec!(1000000);

    let (status, alice) = send!(app, create(json!({"name": "Alice", "amount": 12000, "cleared": true}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(alice["id"], json!(1));
    assert!(alice["amount"].is_number());
    assert_eq!(alice["amount"].as_f64(), Some(12000.0));
    assert_eq!(alice["cleared"], json!(true));

    let (status, bob) = send!(app, create(json!({"name": "Bob", "amount": 5000, "cleared": false}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bob["id"], json!(2));

    let (status, body) = send!(app, list()).await;
    assert_eq!(status, StatusCode::OK);
    let contributors: Vec<Contribution> = serde_json::from_value(body).unwrap();
    assert_eq!(contributors.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(cleared_total(&contributors), dec!(12000));
    assert_eq!(pending_total(&contributors), dec!(5000));
    assert_eq!(remaining_to_goal(&contributors, goal), dec!(988000));

    let (status, bob) = send!(app, patch("2", json!({"cleared": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob["cleared"], json!(true));

    let (_, body) = send!(app, list()).await;
    let contributors: Vec<Contribution> = serde_json::from_value(body).unwrap();
    assert_eq!(cleared_total(&contributors), dec!(17000));
    assert_eq!(pending_total(&contributors), Decimal::ZERO);

    let (status, body) = send!(app, delete("1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = send!(app, list()).await;
    let contributors: Vec<Contribution> = serde_json::from_value(body).unwrap();
    assert_eq!(contributors.len(), 1);
    assert!(contributors.iter().all(|c| c.id != 1));
}

#[actix_web::test]
async fn create_normalizes_values() {
    let app = app!();

    let (status, body) = send!(app, create(json!({"name": "  Chantal  ", "amount": "2500.75"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!("Chantal"));
    assert_eq!(body["amount"].as_f64(), Some(2500.75));
    assert_eq!(body["cleared"], json!(false));
}

#[actix_web::test]
async fn invalid_create_is_rejected_without_side_effects() {
    let app = app!();

    for body in [
        json!({"name": "Alice", "amount": -1}),
        json!({"name": "   ", "amount": 100}),
        json!({"name": "", "amount": 100}),
        json!({"name": "Alice", "amount": "lots"}),
        json!({"amount": 100}),
        json!({"name": "Alice"}),
    ] {
        let (status, error) = send!(app, create(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], json!("Name and a valid amount are required"));
    }

    let (_, body) = send!(app, list()).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn partial_updates_leave_other_fields_alone() {
    let app = app!();
    send!(app, create(json!({"name": "Alice", "amount": 12000, "cleared": true}))).await;

    let (status, body) = send!(app, patch("1", json!({"amount": 9000}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Alice"));
    assert_eq!(body["amount"].as_f64(), Some(9000.0));
    assert_eq!(body["cleared"], json!(true));

    let (_, body) = send!(app, patch("1", json!({"cleared": false}))).await;
    assert_eq!(body["name"], json!("Alice"));
    assert_eq!(body["amount"].as_f64(), Some(9000.0));
    assert_eq!(body["cleared"], json!(false));

    let (_, body) = send!(app, patch("1", json!({"name": " Alicia "}))).await;
    assert_eq!(body["name"], json!("Alicia"));
    assert_eq!(body["amount"].as_f64(), Some(9000.0));
}

#[actix_web::test]
async fn null_fields_leave_stored_values_alone() {
    let app = app!();
    send!(app, create(json!({"name": "Alice", "amount": 12000, "cleared": true}))).await;

    let (status, body) = send!(app, patch("1", json!({"cleared": null, "amount": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"].as_f64(), Some(5.0));
    assert_eq!(body["cleared"], json!(true));

    let (status, body) = send!(app, patch("1", json!({"cleared": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No valid fields provided to update"));
}

#[actix_web::test]
async fn invalid_updates_are_rejected() {
    let app = app!();
    send!(app, create(json!({"name": "Alice", "amount": 100}))).await;

    let (status, body) = send!(app, patch("1", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No valid fields provided to update"));

    let (status, body) = send!(app, patch("1", json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No valid fields provided to update"));

    let (status, body) = send!(app, patch("1", json!({"amount": -1, "cleared": true}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Amount must be a positive number"));

    let (_, body) = send!(app, list()).await;
    assert_eq!(body[0]["cleared"], json!(false));
    assert_eq!(body[0]["amount"].as_f64(), Some(100.0));
}

#[actix_web::test]
async fn unknown_ids_yield_not_found() {
    let app = app!();
    send!(app, create(json!({"name": "Alice", "amount": 100}))).await;

    for id in ["42", "abc", "0"] {
        let (status, body) = send!(app, patch(id, json!({"cleared": true}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Contributor not found"));

        let (status, _) = send!(app, delete(id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, body) = send!(app, list()).await;
    assert_eq!(body[0]["cleared"], json!(false));
}

#[actix_web::test]
async fn deleting_twice_is_not_found() {
    let app = app!();
    send!(app, create(json!({"name": "Alice", "amount": 100}))).await;

    let (status, _) = send!(app, delete("1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send!(app, delete("1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send!(app, create(json!({"name": "Bob", "amount": 5}))).await;
    assert_eq!(body["id"], json!(2));
}

#[actix_web::test]
async fn unsupported_methods_report_allowed_ones() {
    let app = app!();

    let response = test::call_service(
        &app,
        test::TestRequest::put().uri("/api/contributors").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, POST");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], json!("Method Not Allowed"));

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/contributors/1").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "PATCH, DELETE");
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = app!();

    let request = test::TestRequest::post()
        .uri("/api/contributors")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json");
    let (status, body) = send!(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Invalid JSON body"));
}

#[actix_web::test]
async fn health_check_reports_ok() {
    let app = app!();
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
