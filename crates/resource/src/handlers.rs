//! Axum handlers shared by every resource kind.

use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use kelola_http::AppError;
use kelola_store::StoreError;

use crate::extract::{ResourceKey, ValidatedJson};
use crate::service::{Outcome, ResourceService};
use crate::{Resource, STORE_FAILURE_MESSAGE};

/// Routes for one resource kind, relative to its mount point.
pub fn resource_router<R: Resource>(service: ResourceService<R>) -> Router {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
        .with_state(service)
}

/// The store's own error is logged; clients only ever see the generic message.
fn store_failure<R: Resource>(error: StoreError) -> AppError {
    tracing::error!(resource = R::NAME, %error, "store call failed");
    AppError::internal(STORE_FAILURE_MESSAGE)
}

fn not_found<R: Resource>(key: &R::Key) -> AppError {
    AppError::not_found(format!("{} '{}' not found", R::NAME, key))
}

fn mutation_response<R: Resource>(outcome: Outcome, key: &R::Key) -> Result<StatusCode, AppError> {
    match outcome {
        Outcome::Applied => Ok(StatusCode::NO_CONTENT),
        Outcome::NotFound => Err(not_found::<R>(key)),
    }
}

pub async fn list<R: Resource>(
    State(service): State<ResourceService<R>>,
) -> Result<Json<Vec<R::Dto>>, AppError> {
    let items = service.get_all().await.map_err(store_failure::<R>)?;
    Ok(Json(items))
}

pub async fn get_one<R: Resource>(
    State(service): State<ResourceService<R>>,
    ResourceKey(key): ResourceKey<R::Key>,
) -> Result<Json<R::Dto>, AppError> {
    service
        .get_by_id(&key)
        .await
        .map_err(store_failure::<R>)?
        .map(Json)
        .ok_or_else(|| not_found::<R>(&key))
}

pub async fn create<R: Resource>(
    State(service): State<ResourceService<R>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(dto): ValidatedJson<R::Dto>,
) -> Result<impl IntoResponse, AppError> {
    let (key, created) = service
        .create_keyed(dto)
        .await
        .map_err(store_failure::<R>)?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), key);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

pub async fn update<R: Resource>(
    State(service): State<ResourceService<R>>,
    ResourceKey(key): ResourceKey<R::Key>,
    ValidatedJson(dto): ValidatedJson<R::Dto>,
) -> Result<StatusCode, AppError> {
    let outcome = service
        .update(&key, dto)
        .await
        .map_err(store_failure::<R>)?;
    mutation_response::<R>(outcome, &key)
}

pub async fn delete<R: Resource>(
    State(service): State<ResourceService<R>>,
    ResourceKey(key): ResourceKey<R::Key>,
) -> Result<StatusCode, AppError> {
    let outcome = service.delete(&key).await.map_err(store_failure::<R>)?;
    mutation_response::<R>(outcome, &key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Note, Notes};
    use axum::{body::Body, http::Request, response::Response};
    use kelola_store::{InMemoryStore, Store};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(store: &InMemoryStore<Note>) -> Router {
        resource_router(ResourceService::<Notes>::new(Arc::new(store.clone())))
    }

    fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_returns_created_with_location() {
        let store = InMemoryStore::<Note>::new();
        let router = router_with(&store);

        let response = router
            .oneshot(json("POST", "/", serde_json::json!({"title": "plan", "pinned": true})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/1");
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"id": 1, "title": "plan", "pinned": true}));
    }

    #[tokio::test]
    async fn create_without_body_is_rejected_before_the_store() {
        let store = InMemoryStore::<Note>::new();

        let response = router_with(&store).oneshot(empty("POST", "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_returns_every_item() {
        let store = InMemoryStore::<Note>::new();
        let router = router_with(&store);
        for title in ["a", "b"] {
            router
                .clone()
                .oneshot(json("POST", "/", serde_json::json!({"title": title})))
                .await
                .unwrap();
        }

        let response = router.oneshot(empty("GET", "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["title"], "b");
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found() {
        let store = InMemoryStore::<Note>::new();

        let response = router_with(&store).oneshot(empty("GET", "/3")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn unparsable_integer_id_is_bad_request() {
        let store = InMemoryStore::<Note>::new();

        let response = router_with(&store).oneshot(empty("GET", "/abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_and_delete_respond_no_content() {
        let store = InMemoryStore::<Note>::new();
        let router = router_with(&store);
        router
            .clone()
            .oneshot(json("POST", "/", serde_json::json!({"title": "a", "pinned": true})))
            .await
            .unwrap();

        let updated = router
            .clone()
            .oneshot(json("PUT", "/1", serde_json::json!({"title": "b"})))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::NO_CONTENT);
        let stored = store.find(&1).await.unwrap().unwrap();
        assert_eq!(stored.title, "b");
        assert!(!stored.pinned);

        let deleted = router.clone().oneshot(empty("DELETE", "/1")).await.unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let again = router.oneshot(empty("DELETE", "/1")).await.unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let store = InMemoryStore::<Note>::new();

        let response = router_with(&store)
            .oneshot(json("PUT", "/8", serde_json::json!({"title": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn store_failure_is_generic_internal_error() {
        let store = InMemoryStore::<Note>::new().with_limit(Some(0));

        let response = router_with(&store)
            .oneshot(json("POST", "/", serde_json::json!({"title": "x"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], STORE_FAILURE_MESSAGE);
    }
}
