use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::AssessmentDefinition;
use super::domain::{AnswerSet, ContactDetails};
use super::scoring::SectionScore;
use super::AssessmentOutcome;

/// One line of the detailed response listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLine {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

/// Flat, serializable view of a completed assessment: everything a
/// downstream consumer needs to fill an email template, render a results
/// page, or offer a JSON download. No cycles, no opaque handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub industry: Option<String>,
    pub employees: Option<String>,
    pub total_score: u32,
    pub max_score: u32,
    pub score_percentage: u8,
    pub tier_level: String,
    pub recommendation_title: String,
    pub recommendation_text: String,
    pub next_steps: Vec<String>,
    pub section_breakdown: Vec<SectionScore>,
    pub detailed_responses: Vec<AnswerLine>,
    pub may_contact: bool,
    pub submitted_at: DateTime<Utc>,
}

impl AssessmentReport {
    pub fn build(
        contact: &ContactDetails,
        answers: &AnswerSet,
        outcome: &AssessmentOutcome,
        definition: &AssessmentDefinition,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let detailed_responses = definition
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| AnswerLine {
                number: index + 1,
                question: question.text.clone(),
                answer: answers
                    .get(&question.id)
                    .map(|response| response.label().to_string())
                    .unwrap_or_else(|| "Ikke besvaret".to_string()),
            })
            .collect();

        Self {
            company_name: contact.company_name.clone(),
            contact_person: contact.contact_person.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            industry: contact.industry.clone(),
            employees: contact.employees.clone(),
            total_score: outcome.score.total,
            max_score: outcome.score.max_possible,
            score_percentage: outcome.score.percentage,
            tier_level: outcome.recommendation.level.label().to_string(),
            recommendation_title: outcome.recommendation.title.clone(),
            recommendation_text: outcome.recommendation.text.clone(),
            next_steps: outcome.recommendation.next_steps.clone(),
            section_breakdown: outcome.score.section_scores.clone(),
            detailed_responses,
            may_contact: contact.may_contact,
            submitted_at,
        }
    }

    /// Flatten the report into string variables matching the transactional
    /// email template placeholders.
    pub fn template_variables(&self) -> BTreeMap<String, String> {
        let not_given = || "Ikke angivet".to_string();
        let mut variables = BTreeMap::new();
        variables.insert("company_name".to_string(), self.company_name.clone());
        variables.insert("contact_person".to_string(), self.contact_person.clone());
        variables.insert("email".to_string(), self.email.clone());
        variables.insert(
            "phone".to_string(),
            self.phone.clone().unwrap_or_else(not_given),
        );
        variables.insert(
            "industry".to_string(),
            self.industry
                .as_deref()
                .map(industry_label)
                .unwrap_or_else(not_given),
        );
        variables.insert(
            "employees".to_string(),
            self.employees
                .as_deref()
                .map(employees_label)
                .unwrap_or_else(not_given),
        );
        variables.insert("total_score".to_string(), self.total_score.to_string());
        variables.insert("max_score".to_string(), self.max_score.to_string());
        variables.insert(
            "score_percentage".to_string(),
            self.score_percentage.to_string(),
        );
        variables.insert(
            "recommendation_title".to_string(),
            self.recommendation_title.clone(),
        );
        variables.insert(
            "recommendation_text".to_string(),
            self.recommendation_text.clone(),
        );
        variables.insert("next_steps".to_string(), self.next_steps.join("\n"));
        variables.insert(
            "detailed_responses".to_string(),
            self.detailed_responses
                .iter()
                .map(|line| format!("{}. {}\n   Svar: {}", line.number, line.question, line.answer))
                .collect::<Vec<_>>()
                .join("\n\n"),
        );
        variables.insert(
            "may_contact".to_string(),
            if self.may_contact { "JA" } else { "NEJ" }.to_string(),
        );
        variables.insert(
            "submission_date".to_string(),
            self.submitted_at.format("%Y-%m-%d %H:%M").to_string(),
        );
        variables
    }
}

/// Display label for a form industry code. Unknown codes pass through so a
/// newer form build still renders something meaningful.
fn industry_label(code: &str) -> String {
    match code {
        "byggeri" => "Byggeri og anlæg",
        "energi" => "Energi og forsyning",
        "finans" => "Finans og forsikring",
        "handel" => "Handel og detailhandel",
        "industri" => "Industri og produktion",
        "it" => "IT og teknologi",
        "konsulent" => "Konsulent og rådgivning",
        "landbrug" => "Landbrug og fødevarer",
        "logistik" => "Logistik og transport",
        "sundhed" => "Sundhed og social",
        "turisme" => "Turisme og oplevelser",
        "anden" => "Anden branche",
        other => other,
    }
    .to_string()
}

fn employees_label(code: &str) -> String {
    match code {
        "1-3" | "4-9" | "10-49" | "50-249" | "250+" => format!("{code} medarbejdere"),
        other => other.to_string(),
    }
}
