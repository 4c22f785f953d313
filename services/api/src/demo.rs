use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use esg_readiness::assessment::{
    normalizer, AssessmentDefinition, AssessmentEngine, AssessmentService, ContactDetails,
    SubmissionError,
};
use esg_readiness::error::AppError;

use crate::infra::{default_definition, InMemoryResultNotifier, InMemorySubmissionRepository};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON object mapping question ids to answers (ja/nej/ved_ikke)
    pub(crate) answers: PathBuf,
    /// Score against the unweighted 13-point definition instead of the
    /// weighted 17-point one
    #[arg(long)]
    pub(crate) classic: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run the demo as a respondent who declined follow-up contact
    #[arg(long)]
    pub(crate) opt_out: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw_text = std::fs::read_to_string(&args.answers)?;
    let raw: BTreeMap<String, String> = serde_json::from_str(&raw_text)?;

    let definition = if args.classic {
        AssessmentDefinition::classic()
    } else {
        default_definition()
    };

    let normalized =
        normalizer::normalize(&raw, &definition).map_err(SubmissionError::Validation)?;
    for rejected in &normalized.rejected {
        println!(
            "ignoring '{}' for {}: not one of ja/nej/ved_ikke",
            rejected.value, rejected.question.0
        );
    }

    let engine = AssessmentEngine::new(definition);
    let outcome = engine.evaluate(&normalized.answers);

    println!();
    println!("Definition: {}", engine.definition().name());
    println!(
        "Score: {} / {} ({}%)",
        outcome.score.total, outcome.score.max_possible, outcome.score.percentage
    );
    println!();
    for section in &outcome.score.section_scores {
        println!(
            "  {:<55} {} / {} ({}%)",
            section.title, section.earned, section.max, section.percentage
        );
    }
    println!();
    println!("{}", outcome.recommendation.title);
    println!("{}", outcome.recommendation.text);
    for step in &outcome.recommendation.next_steps {
        println!("  - {step}");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemorySubmissionRepository::default());
    let notifier = Arc::new(InMemoryResultNotifier::default());
    let service = AssessmentService::new(
        repository,
        notifier.clone(),
        default_definition(),
        "leads@example.com",
    );

    let contact = ContactDetails {
        company_name: "Demovirksomhed ApS".to_string(),
        contact_person: "Kirsten Dahl".to_string(),
        email: "kirsten@demovirksomhed.dk".to_string(),
        phone: Some("+45 12 34 56 78".to_string()),
        industry: Some("it".to_string()),
        employees: Some("10-49".to_string()),
        may_contact: !args.opt_out,
    };

    let mut raw: BTreeMap<String, String> = service
        .definition()
        .questions()
        .iter()
        .map(|question| (question.id.0.clone(), "nej".to_string()))
        .collect();
    for id in ["q1", "q2", "q3", "q5", "q8", "q11"] {
        raw.insert(id.to_string(), "ja".to_string());
    }
    raw.insert("q12".to_string(), "ved_ikke".to_string());

    let outcome = service.submit(contact, &raw)?;

    println!("Submission {}", outcome.submission_id.0);
    println!(
        "Score: {} / {} ({}%)",
        outcome.outcome.score.total,
        outcome.outcome.score.max_possible,
        outcome.outcome.score.percentage
    );
    println!(
        "Tier: {} ({})",
        outcome.outcome.recommendation.title,
        outcome.outcome.recommendation.level.label()
    );
    println!();
    for message in notifier.messages() {
        println!("Delivered {:?} to {}", message.kind, message.recipient);
    }
    if !outcome.delivery.errors.is_empty() {
        println!("Delivery errors: {:?}", outcome.delivery.errors);
    }

    Ok(())
}
