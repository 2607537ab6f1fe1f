//! JSON body extractor with field-level validation errors.
//!
//! [`ApiJson`] behaves like `axum::Json` on the happy path. On failure it
//! answers with the structured [`AppError`] body and names the offending
//! field, using `serde_path_to_error` to track where deserialization stopped.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::error::AppError;

/// A JSON request body deserialized into `T`.
///
/// Unknown fields, including a client-supplied `id`, are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedMediaType(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parse_json(&bytes).map(ApiJson)
    }
}

/// Deserialize a JSON document, mapping failures to client errors.
///
/// Syntax errors become [`AppError::BadRequest`]; shape errors (missing
/// field, wrong type) become [`AppError::Validation`] naming the field.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(path_error_to_app_error)?;
    de.end()
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;
    Ok(value)
}

fn path_error_to_app_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = err.path().to_string();
    let inner = err.into_inner();

    match inner.classify() {
        Category::Syntax | Category::Eof | Category::Io => {
            AppError::BadRequest(format!("Invalid JSON: {}", inner))
        }
        Category::Data => {
            let full = inner.to_string();
            let position = format!(" at line {} column {}", inner.line(), inner.column());
            let message = full.strip_suffix(&position).unwrap_or(&full).to_string();

            // A missing field is reported against its parent, so recover the name
            // from the message when the path points at the document root.
            let field = if path == "." {
                missing_field_name(&message)
            } else {
                Some(path)
            };

            AppError::Validation {
                field,
                message,
                location: Some(format!("line {}, column {}", inner.line(), inner.column())),
            }
        }
    }
}

fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
