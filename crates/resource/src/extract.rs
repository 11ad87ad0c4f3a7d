//! Request extractors that check input shape before a handler runs.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use kelola_http::AppError;

use crate::PathKey;

/// A declared constraint a request body breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub error: &'static str,
}

impl Violation {
    pub fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }
}

/// Field-level constraints of a request body.
pub trait Validate {
    fn validate(&self) -> Vec<Violation>;
}

/// Record a `required` violation when `value` is blank.
pub fn require_text(violations: &mut Vec<Violation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "required"));
    }
}

/// JSON body that deserialized and passed [`Validate`].
///
/// A missing, mistyped or malformed body, and any violation, is rejected with 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::validation(
                vec![serde_json::json!({ "field": "body", "error": rejection.body_text() })],
                "request body is missing or malformed",
            )
        })?;

        let violations = value.validate();
        if !violations.is_empty() {
            let details = violations
                .iter()
                .map(|violation| serde_json::json!(violation))
                .collect();
            return Err(AppError::validation(details, "request body failed validation"));
        }

        Ok(Self(value))
    }
}

/// Resource identifier read from the `{id}` path segment.
#[derive(Debug, Clone)]
pub struct ResourceKey<K>(pub K);

impl<S, K> FromRequestParts<S> for ResourceKey<K>
where
    S: Send + Sync,
    K: PathKey + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        K::from_path(&segment).map(Self)
    }
}
