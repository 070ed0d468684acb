use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sightings data in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Failures that leave the API as an opaque `{status, message}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed request body.")]
    MalformedPayload,

    #[error("Server error while saving your sighting.")]
    SaveFailed,

    #[error("Server error while reading sightings.")]
    ReadFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MalformedPayload => StatusCode::BAD_REQUEST,
            ApiError::SaveFailed | ApiError::ReadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
