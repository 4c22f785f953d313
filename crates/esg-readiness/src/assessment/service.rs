use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::definition::AssessmentDefinition;
use super::domain::{submission_timestamp, ContactDetails, SubmissionId, SubmissionStatus};
use super::normalizer::{self, RejectedAnswer, ValidationError};
use super::report::AssessmentReport;
use super::repository::{
    MessageKind, OutboundMessage, RepositoryError, ResultNotifier, SubmissionRecord,
    SubmissionRepository,
};
use super::{AssessmentEngine, AssessmentOutcome};

/// Service composing the engine, the submission store, and the delivery
/// adapter. The engine does the scoring; this layer owns the side effects.
pub struct AssessmentService<R, N> {
    engine: Arc<AssessmentEngine>,
    repository: Arc<R>,
    notifier: Arc<N>,
    lead_inbox: String,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

impl<R, N> AssessmentService<R, N>
where
    R: SubmissionRepository + 'static,
    N: ResultNotifier + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        definition: AssessmentDefinition,
        lead_inbox: impl Into<String>,
    ) -> Self {
        Self {
            engine: Arc::new(AssessmentEngine::new(definition)),
            repository,
            notifier,
            lead_inbox: lead_inbox.into(),
        }
    }

    pub fn definition(&self) -> &AssessmentDefinition {
        self.engine.definition()
    }

    /// Normalize, score, persist, and deliver one submission.
    ///
    /// Delivery failures are non-fatal: the respondent always gets their
    /// result, and whatever went wrong is recorded in `delivery`.
    pub fn submit(
        &self,
        contact: ContactDetails,
        raw: &BTreeMap<String, String>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let definition = self.engine.definition();
        let normalized = normalizer::normalize(raw, definition)?;

        if !normalizer::is_complete(&normalized.answers, definition) {
            return Err(SubmissionError::Validation(ValidationError::Incomplete {
                missing: normalizer::missing_count(&normalized.answers, definition),
                expected: definition.question_count(),
            }));
        }

        let outcome = self.engine.evaluate(&normalized.answers);
        let record = SubmissionRecord {
            submission_id: next_submission_id(),
            contact,
            answers: normalized.answers,
            status: SubmissionStatus::Scored,
            outcome: Some(outcome.clone()),
            submitted_at: submission_timestamp(),
        };

        let stored = self.repository.insert(record)?;
        let delivery = self.dispatch(&stored, &outcome);

        Ok(SubmissionOutcome {
            submission_id: stored.submission_id,
            outcome,
            rejected: normalized.rejected,
            delivery,
        })
    }

    /// Fetch a submission and current status for API responses.
    pub fn get(&self, submission_id: &SubmissionId) -> Result<SubmissionRecord, SubmissionError> {
        let record = self
            .repository
            .fetch(submission_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn dispatch(&self, record: &SubmissionRecord, outcome: &AssessmentOutcome) -> DeliveryStatus {
        let report = AssessmentReport::build(
            &record.contact,
            &record.answers,
            outcome,
            self.engine.definition(),
            record.submitted_at,
        );
        let variables = report.template_variables();

        let mut delivery = DeliveryStatus::default();

        let customer = OutboundMessage {
            kind: MessageKind::CustomerReport,
            recipient: record.contact.email.clone(),
            submission_id: record.submission_id.clone(),
            variables: variables.clone(),
        };
        match self.notifier.deliver(customer) {
            Ok(()) => delivery.customer_sent = true,
            Err(err) => {
                warn!(submission_id = %record.submission_id.0, %err, "customer report delivery failed");
                delivery.errors.push(err.to_string());
            }
        }

        if record.contact.may_contact {
            let lead = OutboundMessage {
                kind: MessageKind::LeadNotification,
                recipient: self.lead_inbox.clone(),
                submission_id: record.submission_id.clone(),
                variables,
            };
            match self.notifier.deliver(lead) {
                Ok(()) => delivery.lead_sent = true,
                Err(err) => {
                    warn!(submission_id = %record.submission_id.0, %err, "lead notification delivery failed");
                    delivery.errors.push(err.to_string());
                }
            }
        }

        delivery
    }
}

/// What each submission attempt produced, delivery bookkeeping included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub submission_id: SubmissionId,
    pub outcome: AssessmentOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub rejected: Vec<RejectedAnswer>,
    pub delivery: DeliveryStatus,
}

/// Which outbound messages actually went out. Mirrors the rule that a
/// delivery failure must never hide the respondent's result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStatus {
    pub customer_sent: bool,
    pub lead_sent: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
