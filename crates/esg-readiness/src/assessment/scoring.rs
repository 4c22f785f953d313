use serde::{Deserialize, Serialize};

use super::definition::AssessmentDefinition;
use super::domain::{AnswerSet, Response, SectionId};

/// Subtotal for one section, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: SectionId,
    pub title: String,
    pub earned: u32,
    pub max: u32,
    pub percentage: u8,
}

/// Computed result for one answer set against one definition. Derived
/// fresh on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub total: u32,
    pub max_possible: u32,
    pub percentage: u8,
    pub section_scores: Vec<SectionScore>,
}

/// Single pass over the definition's questions. A missing answer scores as
/// `No`, so partial submissions from mid-form navigation never fail here.
pub fn compute_score(answers: &AnswerSet, definition: &AssessmentDefinition) -> Score {
    let mut section_scores: Vec<SectionScore> = definition
        .sections()
        .iter()
        .map(|section| SectionScore {
            section: section.id.clone(),
            title: section.title.clone(),
            earned: 0,
            max: 0,
            percentage: 0,
        })
        .collect();

    let mut total = 0;
    for question in definition.questions() {
        let earned = matches!(answers.get(&question.id), Some(Response::Yes));
        if let Some(entry) = section_scores
            .iter_mut()
            .find(|entry| entry.section == question.section)
        {
            entry.max += question.weight;
            if earned {
                entry.earned += question.weight;
            }
        }
        if earned {
            total += question.weight;
        }
    }

    for entry in &mut section_scores {
        entry.percentage = rounded_percentage(entry.earned, entry.max);
    }

    let max_possible = definition.max_possible();
    Score {
        total,
        max_possible,
        percentage: rounded_percentage(total, max_possible),
        section_scores,
    }
}

/// round(earned / max * 100), clamped to [0, 100] so a misconfigured weight
/// table can never render an impossible percentage.
fn rounded_percentage(earned: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let percentage = (f64::from(earned) / f64::from(max) * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}
