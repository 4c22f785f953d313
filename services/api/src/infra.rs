use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use esg_readiness::assessment::{
    AssessmentDefinition, NotifyError, OutboundMessage, RepositoryError, ResultNotifier,
    SubmissionId, SubmissionRecord, SubmissionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<HashMap<SubmissionId, SubmissionRecord>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
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

/// In-memory stand-in for the transactional email adapter. Real SMTP/ESP
/// transport is out of scope; routes and the demo only need to observe
/// what would have been sent.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultNotifier {
    messages: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl ResultNotifier for InMemoryResultNotifier {
    fn deliver(&self, message: OutboundMessage) -> Result<(), NotifyError> {
        let mut guard = self.messages.lock().expect("notifier mutex poisoned");
        guard.push(message);
        Ok(())
    }
}

impl InMemoryResultNotifier {
    pub(crate) fn messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn default_definition() -> AssessmentDefinition {
    AssessmentDefinition::standard()
}
