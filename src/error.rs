// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-safe messages.
///
/// Identity problems surface as 422, never 401: the gateway in front of this
/// service owns authentication and rejects anonymous traffic before it gets
/// here, so a request without valid identity headers is a malformed request.
#[derive(Debug)]
pub enum ApiError {
    // 422 Unprocessable Entity
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 422 Unprocessable Entity (trusted identity headers absent or malformed)
    Unauthenticated {
        field_errors: HashMap<String, String>,
    },

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound { entity: &'static str, id: String },

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthenticated { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Unauthenticated { .. } => {
                "Missing or malformed identity headers".to_string()
            }
            ApiError::Forbidden(msg) => msg.clone(),
            ApiError::NotFound { entity, id } => format!("{} {} not found", entity, id),
            ApiError::Internal(msg) => msg.clone(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Unauthenticated { .. } => "AUTHENTICATION_MISSING",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
        });

        match self {
            ApiError::Validation { field_errors, .. } if !field_errors.is_empty() => {
                body["field_errors"] = json!(field_errors);
            }
            ApiError::Unauthenticated { field_errors } => {
                body["field_errors"] = json!(field_errors);
            }
            _ => {}
        }

        body
    }
}

// Static constructors
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let message = message.into();
        ApiError::Validation {
            message: format!("Invalid value for {}", field),
            field_errors: HashMap::from([(field, message)]),
        }
    }

    pub fn unauthenticated(field_errors: HashMap<String, String>) -> Self {
        ApiError::Unauthenticated { field_errors }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        flatten_validation_errors(&errors, "", &mut field_errors);
        ApiError::Validation {
            message: "Validation failed".to_string(),
            field_errors,
        }
    }
}

fn flatten_validation_errors(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut HashMap<String, String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(err) = list.first() {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                flatten_validation_errors(nested, &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_validation_errors(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::NotFound { entity, id },
            StoreError::Sqlx(e) => {
                // Log the real error but never expose it to clients
                tracing::error!("store failure: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
            StoreError::Migrate(e) => {
                tracing::error!("migration failure: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_errors_map_to_422_not_401() {
        let err = ApiError::unauthenticated(HashMap::from([(
            "x-user-id".to_string(),
            "missing required header".to_string(),
        )]));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "AUTHENTICATION_MISSING");
    }

    #[test]
    fn not_found_carries_entity_and_id() {
        let id = uuid::Uuid::new_v4();
        let err = ApiError::not_found("venue", id);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), format!("venue {} not found", id));
    }

    #[test]
    fn store_not_found_converts_to_404() {
        let err: ApiError = StoreError::NotFound {
            entity: "image",
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_body_includes_field_errors() {
        let err = ApiError::field_error("name", "length");
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["name"], "length");
    }
}
