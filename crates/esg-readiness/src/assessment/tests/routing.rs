use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::assessment::repository::{
    RepositoryError, SubmissionRecord, SubmissionRepository,
};
use crate::assessment::router::{
    assessment_router, submit_handler, AssessmentSubmissionRequest,
};
use crate::assessment::service::AssessmentService;
use crate::assessment::SubmissionId;

async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn submission_body(value: &str) -> Vec<u8> {
    let payload = json!({
        "contact": contact(true),
        "answers": uniform_raw(&definition(), value),
    });
    serde_json::to_vec(&payload).expect("payload serializes")
}

#[tokio::test]
async fn submit_route_returns_created_with_outcome() {
    let (service, _, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(submission_body("ja")))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert!(payload.get("submission_id").is_some());
    assert_eq!(payload["outcome"]["score"]["total"], json!(17));
    assert_eq!(payload["outcome"]["score"]["percentage"], json!(100));
    assert_eq!(payload["delivery"]["customer_sent"], json!(true));
}

#[tokio::test]
async fn submit_route_rejects_incomplete_answers() {
    let (service, _, _) = build_service();
    let router = assessment_router(service.clone());

    let mut answers = uniform_raw(service.definition(), "ja");
    answers.remove("q13");
    let payload = json!({
        "contact": contact(false),
        "answers": answers,
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("unanswered"));
}

#[tokio::test]
async fn status_route_returns_scored_view() {
    let (service, _, _) = build_service();
    let raw = uniform_raw(service.definition(), "ja");
    let outcome = service.submit(contact(false), &raw).expect("submission succeeds");
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get(format!(
                "/api/v1/assessments/{}",
                outcome.submission_id.0
            ))
            .body(axum::body::Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("Scored"));
    assert_eq!(payload["total_score"], json!(17));
    assert_eq!(payload["tier"], json!("advanced"));
}

#[tokio::test]
async fn status_route_returns_not_found_for_unknown_id() {
    let (service, _, _) = build_service();
    let router = assessment_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/assessments/sub-999999")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

struct ConflictRepository;

impl SubmissionRepository for ConflictRepository {
    fn insert(&self, _record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Ok(None)
    }
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(ConflictRepository),
        Arc::new(RecordingNotifier::default()),
        definition(),
        LEAD_INBOX,
    ));
    let request = AssessmentSubmissionRequest {
        contact: contact(false),
        answers: uniform_raw(service.definition(), "ja"),
    };

    let response =
        submit_handler::<ConflictRepository, RecordingNotifier>(State(service), axum::Json(request))
            .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(RecordingNotifier::default()),
        definition(),
        LEAD_INBOX,
    ));
    let request = AssessmentSubmissionRequest {
        contact: contact(false),
        answers: uniform_raw(service.definition(), "ja"),
    };

    let response = submit_handler::<UnavailableRepository, RecordingNotifier>(
        State(service),
        axum::Json(request),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
