use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },

    #[error("city '{0}' is not registered")]
    UnknownCity(String),

    #[error("{kind} '{name}' referenced by delivery does not exist")]
    MissingReference { kind: &'static str, name: String },
}

/// Every way an assignment request can fail. Nothing is persisted on any of them.
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("customer '{0}' does not exist")]
    CustomerNotFound(String),

    #[error("customer city '{customer_city}' differs from restaurant city '{restaurant_city}'")]
    CityMismatch {
        customer_city: String,
        restaurant_city: String,
    },

    #[error("no drivers registered in city '{0}'")]
    NoDriversInCity(String),

    #[error("no drivers available in city '{city}' at {at}")]
    NoDriversAvailable { city: String, at: DateTime<Utc> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AssignmentError {
    pub fn kind(&self) -> &'static str {
        match self {
            AssignmentError::CustomerNotFound(_) => "customer_not_found",
            AssignmentError::CityMismatch { .. } => "city_mismatch",
            AssignmentError::NoDriversInCity(_) => "no_drivers_in_city",
            AssignmentError::NoDriversAvailable { .. } => "no_drivers_available",
            AssignmentError::Store(_) => "store",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AppError::Conflict(err.to_string()),
            StoreError::UnknownCity(_) => AppError::NotFound(err.to_string()),
            StoreError::MissingReference { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Conflict(_) => "conflict",
            AppError::Assignment(err) => err.kind(),
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Assignment(err) => match err {
                AssignmentError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
                AssignmentError::CityMismatch { .. } | AssignmentError::NoDriversInCity(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                AssignmentError::NoDriversAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                AssignmentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::Assignment(err) => err.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "kind": self.kind()
        }));

        (status, body).into_response()
    }
}
