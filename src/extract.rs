//! Axum extractor that runs a [`Validator`] before a handler sees the request.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, HeaderMap},
    Json,
};
use serde_json::Value;
use shelf_http::error::AppError;

use crate::validation::{Input, Validator, Violation};

/// A request shape that can be validated and then read from [`Input`].
pub trait FromInput: Sized {
    /// Collect path parameters into the input
    const PARAMS: bool = false;
    /// Parse the JSON body into the input
    const BODY: bool = false;

    fn validator() -> &'static Validator;

    /// Build the typed value. Only called once `validator()` passed.
    fn from_input(input: &Input) -> Result<Self, AppError>;
}

/// Gathers input, validates it, and rejects with every violation at once.
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FromInput,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let mut input = Input::new();

        if T::PARAMS {
            let Path(params) =
                Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
                    .await
                    .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            for (name, value) in params {
                input = input.with_param(name, value);
            }
        }

        // A body sent without a JSON content type is not parsed and reads as `{}`.
        if T::BODY && has_json_content_type(&parts.headers) {
            let Json(body) = Json::<Value>::from_request(Request::from_parts(parts, body), state).await?;
            input = input.with_body(body);
        }

        T::validator()
            .validate(&input)
            .map_err(violations_error)?;

        T::from_input(&input).map(Validated)
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// 400 carrying the serialized violations
pub fn violations_error(violations: Vec<Violation>) -> AppError {
    AppError::validation(
        violations
            .into_iter()
            .filter_map(|violation| serde_json::to_value(violation).ok())
            .collect(),
    )
}
