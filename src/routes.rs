use crate::error::ApiError;
use crate::record::{CandidateSighting, SightingRecord};
use crate::service::{SubmissionResult, SubmissionService};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error};
use serde_json::json;
use std::sync::Arc;

pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed on the server.";

impl IntoResponse for SubmissionResult {
    fn into_response(self) -> Response {
        match self {
            SubmissionResult::Saved {
                outcome,
                message,
                sighting,
            } => (
                StatusCode::OK,
                Json(json!({
                    "status": outcome,
                    "message": message,
                    "sighting": sighting,
                })),
            )
                .into_response(),
            SubmissionResult::ValidationFailed { errors } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": "error",
                    "message": VALIDATION_FAILED_MESSAGE,
                    "errors": errors,
                })),
            )
                .into_response(),
            SubmissionResult::StorageFailed => ApiError::SaveFailed.into_response(),
        }
    }
}

pub async fn root_handler() -> &'static str {
    "Tick backend is running."
}

pub async fn list_handler(
    State(service): State<Arc<SubmissionService>>,
) -> Result<Json<Vec<SightingRecord>>, ApiError> {
    let sightings = tokio::task::spawn_blocking(move || service.list())
        .await
        .map_err(|e| {
            error!("List task failed: {}", e);
            ApiError::ReadFailed
        })?
        .map_err(|_| ApiError::ReadFailed)?;

    Ok(Json(sightings))
}

pub async fn create_handler(
    State(service): State<Arc<SubmissionService>>,
    payload: Result<Json<CandidateSighting>, JsonRejection>,
) -> Result<SubmissionResult, ApiError> {
    let Json(candidate) = payload.map_err(|e| {
        debug!("Rejected sighting body: {}", e);
        ApiError::MalformedPayload
    })?;

    tokio::task::spawn_blocking(move || service.submit(candidate))
        .await
        .map_err(|e| {
            error!("Submit task failed: {}", e);
            ApiError::SaveFailed
        })
}

#[cfg(test)]
mod tests {
    use crate::server::router;
    use crate::service::SubmissionService;
    use crate::service::tests::{BrokenStore, UnreadableStore};
    use crate::store::MemoryStore;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = SubmissionService::new(Arc::new(MemoryStore::new()));
        router(Arc::new(service))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/sightings")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn sighting_body(location: &str, severity: &str) -> String {
        json!({
            "date": "2025-08-14",
            "time": "17:30",
            "location": location,
            "species": "Southern rodent tick",
            "severity": severity,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let response = app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Tick backend is running.");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app();

        let (status, body) = send(&app, post_json(&sighting_body(" London ", "low"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Thank you, your sighting has been recorded.");
        assert_eq!(body["sighting"]["location"], "London");
        assert!(body["sighting"]["id"].as_u64().is_some());

        let (status, listed) = send(&app, get("/api/sightings")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([body["sighting"]]));
    }

    #[tokio::test]
    async fn test_numeric_location_is_warning() {
        let app = app();

        let (status, body) = send(&app, post_json(&sighting_body("12345", "high"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "warning");

        let (_, listed) = send(&app, get("/api/sightings")).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_high_severity_message() {
        let (status, body) = send(&app(), post_json(&sighting_body("Bristol", "high"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(body["message"].as_str().unwrap().contains("HIGH ALERT"));
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = app();
        let (status, body) = send(&app, post_json(r#"{"date": "2025-08-14", "location": "  "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Validation failed on the server.");
        assert_eq!(
            body["errors"],
            json!({
                "location": "Location is required.",
                "severity": "Severity is required.",
                "species": "Species is required.",
                "time": "Time is required.",
            })
        );

        let (_, listed) = send(&app, get("/api/sightings")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = send(&app(), post_json("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "error", "message": "Malformed request body."}));
    }

    #[tokio::test]
    async fn test_storage_failure_is_opaque() {
        let service = SubmissionService::new(Arc::new(BrokenStore));
        let app = router(Arc::new(service));

        let (status, body) = send(&app, post_json(&sighting_body("Leeds", "low"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Server error while saving your sighting."})
        );
        assert!(!body.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn test_list_failure_is_opaque() {
        let store = Arc::new(UnreadableStore::default());
        let app = router(Arc::new(SubmissionService::new(store.clone())));
        store.break_reads();

        let (status, body) = send(&app, get("/api/sightings")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Server error while reading sightings."})
        );
        assert!(!body.to_string().contains("sightings.json"));
        assert!(!body.to_string().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/sightings")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
