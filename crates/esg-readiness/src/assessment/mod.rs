//! ESG readiness assessment: answer normalization, weighted scoring,
//! recommendation selection, and the submission pipeline around them.

pub mod definition;
pub mod domain;
pub mod normalizer;
pub mod recommendation;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use definition::{AssessmentDefinition, ConfigurationError};
pub use domain::{
    AnswerSet, ContactDetails, Question, QuestionId, Response, Section, SectionId, SubmissionId,
    SubmissionStatus,
};
pub use normalizer::{NormalizedAnswers, RejectedAnswer, ValidationError};
pub use recommendation::{RecommendationTier, TierLevel, TierTable, TierThreshold};
pub use report::AssessmentReport;
pub use repository::{
    MessageKind, NotifyError, OutboundMessage, RepositoryError, ResultNotifier,
    SubmissionRecord, SubmissionRepository, SubmissionStatusView,
};
pub use router::assessment_router;
pub use scoring::{Score, SectionScore};
pub use service::{AssessmentService, DeliveryStatus, SubmissionError, SubmissionOutcome};

/// Stateless evaluator applying one validated definition to answer sets.
/// Pure: no I/O, no shared mutable state, safe to call from any number of
/// sessions at once.
pub struct AssessmentEngine {
    definition: AssessmentDefinition,
}

impl AssessmentEngine {
    pub fn new(definition: AssessmentDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &AssessmentDefinition {
        &self.definition
    }

    pub fn evaluate(&self, answers: &AnswerSet) -> AssessmentOutcome {
        let score = scoring::compute_score(answers, &self.definition);
        let recommendation = self.definition.tiers().select(score.total).clone();

        AssessmentOutcome {
            score,
            recommendation,
        }
    }
}

/// Engine output: the computed score plus the static tier content selected
/// for it. Flat data, trivially serializable for email templates, JSON
/// download, or API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub score: Score,
    pub recommendation: RecommendationTier,
}
