use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::assessment::definition::AssessmentDefinition;
use crate::assessment::domain::{AnswerSet, ContactDetails, QuestionId, Response, SubmissionId};
use crate::assessment::repository::{
    MessageKind, NotifyError, OutboundMessage, RepositoryError, ResultNotifier, SubmissionRecord,
    SubmissionRepository,
};
use crate::assessment::service::AssessmentService;

pub(super) const LEAD_INBOX: &str = "leads@test.local";

pub(super) fn definition() -> AssessmentDefinition {
    AssessmentDefinition::standard()
}

pub(super) fn contact(may_contact: bool) -> ContactDetails {
    ContactDetails {
        company_name: "Nordisk Montage ApS".to_string(),
        contact_person: "Mette Holm".to_string(),
        email: "mette@nordiskmontage.dk".to_string(),
        phone: Some("+45 21 43 65 87".to_string()),
        industry: Some("byggeri".to_string()),
        employees: Some("10-49".to_string()),
        may_contact,
    }
}

/// Raw form input answering every question with the same value.
pub(super) fn uniform_raw(definition: &AssessmentDefinition, value: &str) -> BTreeMap<String, String> {
    definition
        .questions()
        .iter()
        .map(|question| (question.id.0.clone(), value.to_string()))
        .collect()
}

/// Typed answer set with `Yes` on the listed ids and `No` elsewhere.
pub(super) fn answers_with_yes(definition: &AssessmentDefinition, yes_ids: &[&str]) -> AnswerSet {
    definition
        .questions()
        .iter()
        .map(|question| {
            let response = if yes_ids.contains(&question.id.0.as_str()) {
                Response::Yes
            } else {
                Response::No
            };
            (question.id.clone(), response)
        })
        .collect()
}

pub(super) fn question_id(value: &str) -> QuestionId {
    QuestionId::new(value)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<SubmissionId, SubmissionRecord>>,
}

impl SubmissionRepository for MemoryRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.submission_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.submission_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<OutboundMessage>>,
    pub(super) reject_customer: bool,
}

impl RecordingNotifier {
    pub(super) fn rejecting_customer() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_customer: true,
        }
    }

    pub(super) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ResultNotifier for RecordingNotifier {
    fn deliver(&self, message: OutboundMessage) -> Result<(), NotifyError> {
        if self.reject_customer && message.kind == MessageKind::CustomerReport {
            return Err(NotifyError::Transport("smtp relay offline".to_string()));
        }
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(message);
        Ok(())
    }
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<MemoryRepository, RecordingNotifier>>,
    Arc<MemoryRepository>,
    Arc<RecordingNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = Arc::new(AssessmentService::new(
        repository.clone(),
        notifier.clone(),
        definition(),
        LEAD_INBOX,
    ));
    (service, repository, notifier)
}
