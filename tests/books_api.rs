use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shelf_app::bootstrap::offline_registry;
use shelf_kernel::settings::Settings;
use tower::ServiceExt;

fn app() -> Router {
    shelf_http::build_router(&offline_registry(), &Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn valid_book() -> Value {
    json!({
        "bookName": "The Rust Programming Language",
        "price": 39.99,
        "countInStock": 25,
        "image": "https://example.com/trpl.png"
    })
}

async fn create(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(valid_book())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn created_book_is_retrievable() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/books", Some(valid_book())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(created["dateCreated"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["bookName"], "The Rust Programming Language");
}

#[tokio::test]
async fn short_book_name_is_rejected() {
    let app = app();
    let mut book = valid_book();
    book["bookName"] = json!("abc");

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "bookName");
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["value"], "abc");

    let (_, listed) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert!(fields.contains(&"bookName"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"countInStock"));
    assert!(!fields.contains(&"image"));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/65f1c2a9e4b0a1b2c3d4e5f6", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["location"], "params");
}

#[tokio::test]
async fn partial_update_changes_only_sent_fields() {
    let app = app();
    let id = create(&app).await;
    let path = format!("/books/{}", id);
    let (_, before) = send(&app, Method::GET, &path, None).await;

    let (status, body) = send(&app, Method::PUT, &path, Some(json!({ "price": 12.5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book updated successfully" }));

    let (_, after) = send(&app, Method::GET, &path, None).await;
    assert_eq!(after["price"], json!(12.5));
    assert_eq!(after["bookName"], before["bookName"]);
    assert_eq!(after["countInStock"], before["countInStock"]);
    assert_eq!(after["image"], before["image"]);
    assert_eq!(after["dateCreated"], before["dateCreated"]);
}

#[tokio::test]
async fn update_validates_fields_and_target() {
    let app = app();
    let id = create(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(json!({ "countInStock": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "countInStock");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/65f1c2a9e4b0a1b2c3d4e5f6",
        Some(json!({ "price": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_once() {
    let app = app();
    let id = create(&app).await;
    let path = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted successfully" }));

    let (status, _) = send(&app, Method::DELETE, &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_book() {
    let app = app();
    create(&app).await;
    create(&app).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_json_is_a_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (status, spec) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"].get("/books/{id}").is_some());
}

#[tokio::test]
async fn integral_float_count_is_accepted() {
    let app = app();
    let mut book = valid_book();
    book["countInStock"] = json!(25.0);

    let (status, created) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["countInStock"], json!(25));

    let path = format!("/books/{}", created["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::PUT, &path, Some(json!({ "countInStock": 1e2 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = send(&app, Method::GET, &path, None).await;
    assert_eq!(after["countInStock"], json!(100));
}

#[tokio::test]
async fn empty_update_of_unknown_book_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/65f1c2a9e4b0a1b2c3d4e5f6",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn body_without_json_content_type_reads_as_empty() {
    let app = app();
    let id = create(&app).await;
    let path = format!("/books/{}", id);
    let (_, before) = send(&app, Method::GET, &path, None).await;

    let untyped = |method: Method, uri: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(json!({ "price": 1 }).to_string()))
            .unwrap()
    };

    let response = app.clone().oneshot(untyped(Method::PUT, &path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let (_, after) = send(&app, Method::GET, &path, None).await;
    assert_eq!(after, before);

    let response = app
        .clone()
        .oneshot(untyped(Method::PUT, "/books/65f1c2a9e4b0a1b2c3d4e5f6"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(untyped(Method::POST, "/books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
}

#[tokio::test]
async fn api_docs_redirects_to_swagger_ui() {
    let app = app();
    let response = app
        .oneshot(Request::get("/api-docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/swagger-ui/");
}
