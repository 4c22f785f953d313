use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ContactDetails, SubmissionId};
use super::repository::{RepositoryError, ResultNotifier, SubmissionRepository};
use super::service::{AssessmentService, SubmissionError};

/// Request body for a completed questionnaire. Answers arrive as the raw
/// string map the form produced; normalization happens server side.
#[derive(Debug, Deserialize)]
pub struct AssessmentSubmissionRequest {
    pub contact: ContactDetails,
    pub answers: BTreeMap<String, String>,
}

/// Router builder exposing HTTP endpoints for submission and lookup.
pub fn assessment_router<R, N>(service: Arc<AssessmentService<R, N>>) -> Router
where
    R: SubmissionRepository + 'static,
    N: ResultNotifier + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<R, N>))
        .route(
            "/api/v1/assessments/:submission_id",
            get(status_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<AssessmentService<R, N>>>,
    axum::Json(request): axum::Json<AssessmentSubmissionRequest>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: ResultNotifier + 'static,
{
    match service.submit(request.contact, &request.answers) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(SubmissionError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "submission already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<AssessmentService<R, N>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: SubmissionRepository + 'static,
    N: ResultNotifier + 'static,
{
    let id = SubmissionId(submission_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(SubmissionError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "submission_id": id.0,
                "error": "submission not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
