use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::AssessmentDefinition;
use super::domain::{AnswerSet, QuestionId, Response};

/// Respondent-input errors. Distinct from [`ConfigurationError`], which
/// covers broken definitions and never depends on user input.
///
/// [`ConfigurationError`]: super::definition::ConfigurationError
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no answers supplied")]
    EmptyInput,
    #[error("{missing} of {expected} questions are unanswered")]
    Incomplete { missing: usize, expected: usize },
}

/// An entry whose value was outside the enumerated response set. Reported
/// rather than fatal: one garbled radio value must not discard the rest of
/// a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedAnswer {
    pub question: QuestionId,
    pub value: String,
}

/// Result of normalizing raw form input against a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnswers {
    pub answers: AnswerSet,
    pub rejected: Vec<RejectedAnswer>,
    /// Entries whose question id the definition does not know. Ignored for
    /// forward compatibility with newer form builds.
    pub ignored: usize,
}

/// Validate raw string answers into a typed [`AnswerSet`].
///
/// Unknown question ids are ignored; values outside the enumerated set are
/// collected in `rejected` and the corresponding question is left
/// unanswered. Only a completely empty mapping is an error.
pub fn normalize(
    raw: &BTreeMap<String, String>,
    definition: &AssessmentDefinition,
) -> Result<NormalizedAnswers, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let mut answers = AnswerSet::new();
    let mut rejected = Vec::new();
    let mut ignored = 0;

    for (key, value) in raw {
        let question = QuestionId::new(key.clone());
        if !definition.contains_question(&question) {
            ignored += 1;
            continue;
        }

        match Response::parse(value) {
            Some(response) => answers.respond(question, response),
            None => rejected.push(RejectedAnswer {
                question,
                value: value.clone(),
            }),
        }
    }

    Ok(NormalizedAnswers {
        answers,
        rejected,
        ignored,
    })
}

/// Structural completeness check: every question in the definition has an
/// entry. Assumes `answers` already passed normalization.
pub fn is_complete(answers: &AnswerSet, definition: &AssessmentDefinition) -> bool {
    definition
        .questions()
        .iter()
        .all(|question| answers.contains(&question.id))
}

/// Count of unanswered questions, for error reporting.
pub fn missing_count(answers: &AnswerSet, definition: &AssessmentDefinition) -> usize {
    definition
        .questions()
        .iter()
        .filter(|question| !answers.contains(&question.id))
        .count()
}
