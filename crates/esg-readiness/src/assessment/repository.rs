use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, ContactDetails, SubmissionId, SubmissionStatus};
use super::recommendation::TierLevel;
use super::AssessmentOutcome;

/// Repository record containing the contact, answers, and scoring outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_id: SubmissionId,
    pub contact: ContactDetails,
    pub answers: AnswerSet,
    pub status: SubmissionStatus,
    pub outcome: Option<AssessmentOutcome>,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn status_view(&self) -> SubmissionStatusView {
        SubmissionStatusView {
            submission_id: self.submission_id.clone(),
            status: self.status.label(),
            total_score: self.outcome.as_ref().map(|outcome| outcome.score.total),
            percentage: self.outcome.as_ref().map(|outcome| outcome.score.percentage),
            tier: self
                .outcome
                .as_ref()
                .map(|outcome| outcome.recommendation.level),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Which of the two outbound messages a payload represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Report sent to the respondent with their result and recommendation.
    CustomerReport,
    /// Notification to the sales inbox; only sent when the respondent
    /// opted in to being contacted.
    LeadNotification,
}

/// Flat message payload handed to the delivery adapter. The `variables`
/// map lines up with transactional email template placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub kind: MessageKind,
    pub recipient: String,
    pub submission_id: SubmissionId,
    pub variables: BTreeMap<String, String>,
}

/// Trait describing outbound delivery hooks (transactional email adapters,
/// test doubles). Implementations own their own retry and timeout policy;
/// the engine never blocks on them.
pub trait ResultNotifier: Send + Sync {
    fn deliver(&self, message: OutboundMessage) -> Result<(), NotifyError>;
}

/// Delivery dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Sanitized representation of a submission's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatusView {
    pub submission_id: SubmissionId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierLevel>,
}
