use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

/// Crate-wide error type.
///
/// `NotFound` and `Validation` are produced before any row is written;
/// `Conflict` is the database reporting a unique or foreign-key violation
/// after the fact, so it carries no field-level detail.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl ShopError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbErr> for ShopError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Database(err),
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": self.to_string() }))).into_response()
            }
            Self::Validation { field, ref message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message, "field": field })),
            )
                .into_response(),
            Self::Conflict(ref message) => {
                (StatusCode::CONFLICT, Json(json!({ "error": message }))).into_response()
            }
            Self::Database(ref err) => {
                tracing::error!(error = %err, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = ShopError::validation("quantity", "must be at least 1");
        assert_eq!(err.to_string(), "invalid quantity: must be at least 1");
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = ShopError::not_found("customer", 42);
        assert_eq!(err.to_string(), "customer 42 not found");
    }

    #[test]
    fn record_not_found_db_err_stays_a_database_error() {
        let err: ShopError = DbErr::RecordNotFound("orders".to_string()).into();
        assert!(matches!(err, ShopError::Database(_)));
    }
}
