use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use kelola_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    kelola_app::build_app(&Settings::default()).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_book(app: &Router, body: Value) -> Value {
    let response = send(app, "POST", "/api/books", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_then_get_returns_identical_book() {
    let app = app();

    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({"name": "Dune", "price": 15, "category": "SciFi", "author": "Herbert"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert_eq!(location, format!("/api/books/{id}"));
    assert_eq!(created["name"], "Dune");
    assert_eq!(created["price"], 15.0);
    assert_eq!(created["category"], "SciFi");
    assert_eq!(created["author"], "Herbert");

    let fetched = send(&app, "GET", &location, None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, created);
}

#[tokio::test]
async fn create_ignores_client_chosen_id() {
    let app = app();

    let created = create_book(&app, json!({"id": "client-chosen", "name": "X"})).await;

    let id = created["id"].as_str().unwrap();
    assert_ne!(id, "client-chosen");
    assert_eq!(id.len(), 24);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = app();
    let created = create_book(
        &app,
        json!({"name": "A", "price": 1, "category": "Poetry", "author": "Anon"}),
    )
    .await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    let updated = send(&app, "PUT", &uri, Some(json!({"name": "B"}))).await;
    assert_eq!(updated.status(), StatusCode::NO_CONTENT);

    let stored = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(stored["id"], created["id"]);
    assert_eq!(stored["name"], "B");
    assert_eq!(stored["price"], 0.0);
    assert_eq!(stored["category"], "");
    assert_eq!(stored["author"], "");
}

#[tokio::test]
async fn update_unknown_book_is_not_found_and_changes_nothing() {
    let app = app();
    let first = create_book(&app, json!({"name": "Kept", "price": 3})).await;
    let second = create_book(&app, json!({"name": "Also kept"})).await;
    let before = body_json(send(&app, "GET", "/api/books", None).await).await;

    let response = send(
        &app,
        "PUT",
        "/api/books/000000000000000000000000",
        Some(json!({"name": "Ghost", "price": 9})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let after = body_json(send(&app, "GET", "/api/books", None).await).await;
    assert_eq!(before, after);
    for book in [first, second] {
        let uri = format!("/api/books/{}", book["id"].as_str().unwrap());
        assert_eq!(body_json(send(&app, "GET", &uri, None).await).await, book);
    }
}

#[tokio::test]
async fn delete_twice_reports_not_found_the_second_time() {
    let app = app();
    let created = create_book(&app, json!({"name": "Temporary"})).await;
    let uri = format!("/api/books/{}", created["id"].as_str().unwrap());

    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_id_is_not_found_for_get_and_delete() {
    let app = app();
    create_book(&app, json!({"name": "Only"})).await;

    let missing = "/api/books/ffffffffffffffffffffffff";
    assert_eq!(send(&app, "GET", missing, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", missing, None).await.status(), StatusCode::NOT_FOUND);

    let all = body_json(send(&app, "GET", "/api/books", None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ids_of_wrong_length_do_not_address_a_book() {
    let app = app();

    let response = send(&app, "GET", "/api/books/123", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_bodies_are_rejected() {
    let app = app();

    let missing = send(&app, "POST", "/api/books", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unnamed = send(&app, "POST", "/api/books", Some(json!({"price": 4}))).await;
    assert_eq!(unnamed.status(), StatusCode::BAD_REQUEST);

    let negative = send(&app, "POST", "/api/books", Some(json!({"name": "X", "price": -2}))).await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
    let body = body_json(negative).await;
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "price");

    let all = body_json(send(&app, "GET", "/api/books", None).await).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn full_store_fails_create_with_generic_message() {
    let mut settings = Settings::default();
    settings.store.max_records = Some(1);
    let app = kelola_app::build_app(&settings).unwrap();
    create_book(&app, json!({"name": "Fits"})).await;

    let response = send(&app, "POST", "/api/books", Some(json!({"name": "Overflow"}))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Error retrieving data from the database"
    );
}
