use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{Notifier, app};

async fn test_app() -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (app(engine, db.clone(), Notifier::disabled()), db)
}

async fn seed_user(db: &DatabaseConnection, username: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password, email) VALUES (?, ?, ?)",
        vec![
            username.into(),
            "password".into(),
            format!("{username}@example.org").into(),
        ],
    ))
    .await
    .unwrap();
}

fn basic_auth(username: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

fn request_body(needed_by: DateTime<Utc>) -> Value {
    json!({
        "requesterName": "Asha",
        "phone": "0123456789",
        "email": "asha@example.org",
        "requestedItem": "Rice",
        "quantity": "100 meals",
        "location": "Ward 3",
        "neededBy": needed_by.to_rfc3339(),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_request(
    router: &Router,
    needed_by: DateTime<Utc>,
    auth: Option<&str>,
) -> String {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/food-requests")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = builder
        .body(Body::from(request_body(needed_by).to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["data"]["id"].as_str().unwrap().to_string()
}

async fn pledge(router: &Router, request_id: &str, auth: &str, quantity: &str) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/food-requests/{request_id}/pledges"))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, auth)
        .body(Body::from(json!({ "quantity": quantity }).to_string()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

async fn get(router: &Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

fn tomorrow() -> DateTime<Utc> {
    Utc::now() + Duration::days(1)
}

#[tokio::test]
async fn health_returns_success_envelope() {
    let (router, _db) = test_app().await;

    let response = get(&router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn create_request_returns_created_envelope() {
    let (router, _db) = test_app().await;

    let id = create_request(&router, tomorrow(), None).await;
    assert!(!id.is_empty());
}

#[tokio::test]
async fn create_request_with_bad_phone_is_unprocessable() {
    let (router, _db) = test_app().await;

    let mut body = request_body(tomorrow());
    body["phone"] = json!("12345");
    let request = Request::builder()
        .method("POST")
        .uri("/food-requests")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn create_request_with_bad_credentials_is_unauthorized() {
    let (router, _db) = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/food-requests")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, basic_auth("ghost", "nope"))
        .body(Body::from(request_body(tomorrow()).to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pledge_requires_authentication() {
    let (router, _db) = test_app().await;
    let id = create_request(&router, tomorrow(), None).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/food-requests/{id}/pledges"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "quantity": "10" }).to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pledge_with_wrong_password_is_unauthorized() {
    let (router, db) = test_app().await;
    seed_user(&db, "bob").await;
    let id = create_request(&router, tomorrow(), None).await;

    let response = pledge(&router, &id, &basic_auth("bob", "wrong"), "10").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admitted_pledge_shows_up_in_detail_aggregate() {
    let (router, db) = test_app().await;
    seed_user(&db, "bob").await;
    let id = create_request(&router, tomorrow(), None).await;

    let response = pledge(&router, &id, &basic_auth("bob", "password"), "30").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["id"].is_string());

    let response = get(&router, &format!("/food-requests/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["requested_total"], 100);
    assert_eq!(json["data"]["pledged_total"], 30);
    assert_eq!(json["data"]["remaining"], 70);
}

#[tokio::test]
async fn pledge_to_missing_request_is_not_found() {
    let (router, db) = test_app().await;
    seed_user(&db, "bob").await;
    let auth = basic_auth("bob", "password");

    let response = pledge(&router, &uuid::Uuid::new_v4().to_string(), &auth, "5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Ids that are not even UUIDs answer the same way.
    let response = pledge(&router, "nonexistent-id", &auth, "5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pledge_to_expired_request_is_bad_request() {
    let (router, db) = test_app().await;
    seed_user(&db, "bob").await;
    let id = create_request(&router, Utc::now() - Duration::days(1), None).await;

    let response = pledge(&router, &id, &basic_auth("bob", "password"), "10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn self_pledge_is_bad_request() {
    let (router, db) = test_app().await;
    seed_user(&db, "alice").await;
    seed_user(&db, "bob").await;
    let auth_alice = basic_auth("alice", "password");
    let id = create_request(&router, tomorrow(), Some(&auth_alice)).await;

    let response = pledge(&router, &id, &auth_alice, "10").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = pledge(&router, &id, &basic_auth("bob", "password"), "10").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn expired_request_vanishes_from_list_and_detail() {
    let (router, _db) = test_app().await;
    let expired = create_request(&router, Utc::now() - Duration::days(1), None).await;
    let open = create_request(&router, tomorrow(), None).await;

    let response = get(&router, "/food-requests").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], open.as_str());

    let response = get(&router, &format!("/food-requests/{expired}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_newest_first() {
    let (router, _db) = test_app().await;
    let older = create_request(&router, tomorrow(), None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = create_request(&router, tomorrow(), None).await;

    let response = get(&router, "/food-requests").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], newer.as_str());
    assert_eq!(data[1]["id"], older.as_str());
}
