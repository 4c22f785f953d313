use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for questions ("q1".."q13" in the standard set).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Identifier wrapper for question sections.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl SectionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Identifier wrapper for stored submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// The three answers a respondent can give. Wire literals match the Danish
/// form values the assessment has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    #[serde(rename = "ja")]
    Yes,
    #[serde(rename = "nej")]
    No,
    #[serde(rename = "ved_ikke")]
    Unsure,
}

impl Response {
    /// Parse a raw form value, accepting English aliases alongside the
    /// canonical Danish literals.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ja" | "yes" => Some(Self::Yes),
            "nej" | "no" => Some(Self::No),
            "ved_ikke" | "ved ikke" | "unsure" => Some(Self::Unsure),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Ja",
            Self::No => "Nej",
            Self::Unsure => "Ved ikke",
        }
    }
}

/// One question of an assessment definition. A `Yes` answer earns `weight`
/// points; `No` and `Unsure` earn nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub section: SectionId,
}

fn default_weight() -> u32 {
    1
}

/// A named grouping of questions for subtotal reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
}

/// Validated mapping of question id to response. Built one entry at a time
/// while the respondent moves through the form; treated as immutable once
/// handed to the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet(BTreeMap<QuestionId, Response>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&mut self, question: QuestionId, response: Response) {
        self.0.insert(question, response);
    }

    pub fn get(&self, question: &QuestionId) -> Option<Response> {
        self.0.get(question).copied()
    }

    pub fn contains(&self, question: &QuestionId) -> bool {
        self.0.contains_key(question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, Response)> {
        self.0.iter().map(|(id, response)| (id, *response))
    }
}

impl FromIterator<(QuestionId, Response)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, Response)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Contact details captured before the questionnaire starts. No protected
/// characteristics, flat and serializable for downstream delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub employees: Option<String>,
    /// Whether the respondent agreed to be contacted with advice and offers.
    /// Gates the lead notification to the sales inbox.
    #[serde(default)]
    pub may_contact: bool,
}

/// Lifecycle states for a stored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Received,
    Scored,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Scored => "Scored",
        }
    }
}

/// Timestamp helper so records and reports agree on the clock.
pub fn submission_timestamp() -> DateTime<Utc> {
    Utc::now()
}
