use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Question, QuestionId, Section, SectionId};
use super::recommendation::{RecommendationTier, TierLevel, TierTable, TierThreshold};

/// Errors raised while assembling a definition. All of these indicate a
/// broken configuration, not bad respondent input, and surface before any
/// answer is ever scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("definition contains no questions")]
    EmptyQuestionSet,
    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),
    #[error("duplicate section id '{0}'")]
    DuplicateSectionId(String),
    #[error("question '{question}' has zero weight")]
    ZeroWeight { question: String },
    #[error("question '{question}' references unknown section '{section}'")]
    UnknownSection { question: String, section: String },
    #[error("tier table has no entries")]
    EmptyTierTable,
    #[error("the final tier must be unbounded")]
    UnboundedTierMissing,
    #[error("only the final tier may be unbounded")]
    UnboundedTierNotLast,
    #[error("tier bounds must be strictly ascending ({previous} then {next})")]
    NonAscendingThresholds { previous: u32, next: u32 },
    #[error("tier bound {bound} leaves no score for the top tier (max possible {max_possible})")]
    ThresholdBeyondMax { bound: u32, max_possible: u32 },
}

/// One complete assessment configuration: questions, sections, weights, and
/// the tier table. The observed variants (13-point classic, 17-point
/// weighted) are data here, not code branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDefinition {
    name: String,
    sections: Vec<Section>,
    questions: Vec<Question>,
    tiers: TierTable,
}

impl AssessmentDefinition {
    /// Validate and assemble a definition. Fails fast on duplicate ids,
    /// zero weights, dangling section references, and unreachable tiers.
    pub fn new(
        name: impl Into<String>,
        sections: Vec<Section>,
        questions: Vec<Question>,
        tiers: TierTable,
    ) -> Result<Self, ConfigurationError> {
        if questions.is_empty() {
            return Err(ConfigurationError::EmptyQuestionSet);
        }

        let mut section_ids = BTreeSet::new();
        for section in &sections {
            if !section_ids.insert(section.id.clone()) {
                return Err(ConfigurationError::DuplicateSectionId(section.id.0.clone()));
            }
        }

        let mut question_ids = BTreeSet::new();
        for question in &questions {
            if !question_ids.insert(question.id.clone()) {
                return Err(ConfigurationError::DuplicateQuestionId(
                    question.id.0.clone(),
                ));
            }
            if question.weight == 0 {
                return Err(ConfigurationError::ZeroWeight {
                    question: question.id.0.clone(),
                });
            }
            if !section_ids.contains(&question.section) {
                return Err(ConfigurationError::UnknownSection {
                    question: question.id.0.clone(),
                    section: question.section.0.clone(),
                });
            }
        }

        let max_possible: u32 = questions.iter().map(|question| question.weight).sum();
        if let Some(bound) = tiers.last_finite_bound() {
            if bound >= max_possible {
                return Err(ConfigurationError::ThresholdBeyondMax {
                    bound,
                    max_possible,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            sections,
            questions,
            tiers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Sum of all weights. A property of the question set alone, stable for
    /// a given definition so percentage displays are reproducible.
    pub fn max_possible(&self) -> u32 {
        self.questions.iter().map(|question| question.weight).sum()
    }

    pub fn contains_question(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|question| &question.id == id)
    }

    pub fn section_title(&self, id: &SectionId) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| &section.id == id)
            .map(|section| section.title.as_str())
    }

    /// The weighted 13-question / 17-point definition currently deployed:
    /// q3, q5, q8, and q10 count double, tier bounds at 6 and 12.
    pub fn standard() -> Self {
        let sections = smv_sections();
        let questions = vec![
            question("q1", "s1", 1, "Har I i ledelsen en fælles forståelse af, hvad ESG betyder for jeres virksomhed?"),
            question("q2", "s1", 1, "Har I formuleret en holdning til klima, socialt ansvar og governance?"),
            question("q3", "s1", 2, "Har I identificeret, hvilke ESG-faktorer der er væsentlige for jeres virksomhed og jeres branche?"),
            question("q4", "s2", 1, "Har I konkrete mål for fx CO₂-reduktion, diversitet, medarbejdertrivsel og ansvarlig leverandørstyring?"),
            question("q5", "s2", 2, "Har I processer til at indsamle og dokumentere data om jeres ESG-indsats?"),
            question("q6", "s2", 1, "Kommunikerer I allerede i dag om jeres ansvar og resultater – fx på hjemmeside, i tilbud eller i dialog med kunder?"),
            question("q7", "s3", 1, "Indgår ESG som en aktiv del af jeres strategi og værdigrundlag?"),
            question("q8", "s3", 2, "Har jeres vigtigste kunder eller samarbejdspartnere spurgt ind til jeres ESG-indsats?"),
            question("q9", "s3", 1, "Oplever I, at krav til bæredygtighed og ESG i stigende grad er et konkurrenceparameter?"),
            question("q10", "s4", 2, "Ville I kunne dokumentere jeres ESG-arbejde, hvis I blev spurgt i morgen?"),
            question("q11", "s4", 1, "Er I klar over, at krav til ESG-rapportering allerede gælder store virksomheder?"),
            question("q12", "s4", 1, "Har I overblik over de risici, der kan ramme jeres forretning, hvis I ikke arbejder systematisk med ESG?"),
            question("q13", "s4", 1, "Ville det styrke jeres konkurrenceevne, rekruttering og relationer, hvis I kunne vise ansvar og resultater på ESG?"),
        ];

        let tiers = TierTable::new(vec![
            TierThreshold {
                upper_bound: Some(6),
                tier: RecommendationTier {
                    level: TierLevel::Starter,
                    title: "I er i opstartsfasen".to_string(),
                    text: "Det er helt naturligt for mange SMV'er, men det bliver vigtigt at komme i gang, både for at imødekomme krav og gribe nye muligheder.".to_string(),
                    next_steps: vec![
                        "Få overblik over ESG-faktorer relevante for jeres branche".to_string(),
                        "Sæt ét konkret mål at starte med".to_string(),
                        "Uddann jer selv og teamet i ESG-grundlæggende".to_string(),
                        "Start dialogen om bæredygtighed internt".to_string(),
                    ],
                },
            },
            TierThreshold {
                upper_bound: Some(12),
                tier: RecommendationTier {
                    level: TierLevel::Intermediate,
                    title: "I har fat i mange af de rigtige ting".to_string(),
                    text: "Måske uden at kalde det ESG. Det er nu, I skal systematisere arbejdet og begynde at dokumentere det.".to_string(),
                    next_steps: vec![
                        "Implementer systemer til dataindsamling og dokumentation".to_string(),
                        "Forbered jer på øgede rapporteringskrav".to_string(),
                        "Kommuniker aktivt om jeres ESG-indsats".to_string(),
                        "Strukturer og systematiser jeres arbejde".to_string(),
                    ],
                },
            },
            TierThreshold {
                upper_bound: None,
                tier: RecommendationTier {
                    level: TierLevel::Advanced,
                    title: "I er godt i gang".to_string(),
                    text: "Måske længere end mange andre SMV'er. I har mulighed for at bruge ESG strategisk og differentiere jer.".to_string(),
                    next_steps: vec![
                        "Optimer og effektivisér jeres ESG-processer".to_string(),
                        "Integrer ESG strategisk i forretningsmodellen".to_string(),
                        "Bliv frontløber og del jeres erfaringer".to_string(),
                        "Brug ESG som konkurrencefordel".to_string(),
                    ],
                },
            },
        ])
        .expect("standard tier table is valid");

        Self::new("esg-smv-standard", sections, questions, tiers)
            .expect("standard definition is valid")
    }

    /// The original unweighted variant: 13 questions worth one point each,
    /// tier bounds at 5 and 9. Kept so earlier campaign links keep scoring
    /// the way they were published.
    pub fn classic() -> Self {
        let standard = Self::standard();
        let questions = standard
            .questions
            .iter()
            .map(|question| Question {
                weight: 1,
                ..question.clone()
            })
            .collect();

        let tiers = TierTable::new(vec![
            TierThreshold {
                upper_bound: Some(5),
                tier: RecommendationTier {
                    level: TierLevel::Starter,
                    title: "I er i startfasen".to_string(),
                    text: "ESG er nok ikke en topprioritet endnu, men det kan blive det hurtigt. Start med at få overblik og sæt ét konkret mål.".to_string(),
                    next_steps: vec![
                        "Få overblik over ESG-faktorer relevante for jeres branche".to_string(),
                        "Sæt ét konkret mål at starte med".to_string(),
                    ],
                },
            },
            TierThreshold {
                upper_bound: Some(9),
                tier: RecommendationTier {
                    level: TierLevel::Intermediate,
                    title: "I har fat i mange af de rigtige ting".to_string(),
                    text: "Måske uden at kalde det ESG. Nu er det tid til at strukturere arbejdet og forberede jer på, at kunder og myndigheder vil kræve mere dokumentation.".to_string(),
                    next_steps: vec![
                        "Strukturer og systematiser jeres arbejde".to_string(),
                        "Forbered jer på øgede dokumentationskrav".to_string(),
                    ],
                },
            },
            TierThreshold {
                upper_bound: None,
                tier: RecommendationTier {
                    level: TierLevel::Advanced,
                    title: "I er godt på vej".to_string(),
                    text: "Måske endda foran mange andre SMV'er. I har potentiale til at bruge ESG aktivt som en del af jeres strategi og som konkurrencefordel.".to_string(),
                    next_steps: vec![
                        "Optimer jeres processer og kommunikation".to_string(),
                        "Brug ESG som konkurrencefordel".to_string(),
                    ],
                },
            },
        ])
        .expect("classic tier table is valid");

        Self::new("esg-smv-classic", standard.sections.clone(), questions, tiers)
            .expect("classic definition is valid")
    }
}

fn smv_sections() -> Vec<Section> {
    vec![
        Section {
            id: SectionId::new("s1"),
            title: "Del 1: Har I styr på det grundlæggende?".to_string(),
        },
        Section {
            id: SectionId::new("s2"),
            title: "Del 2: Har I sat mål, og måler I fremdrift?".to_string(),
        },
        Section {
            id: SectionId::new("s3"),
            title: "Del 3: Er ESG en del af jeres strategi og forretning?".to_string(),
        },
        Section {
            id: SectionId::new("s4"),
            title: "Del 4: License to operate, risici og fremtidssikring".to_string(),
        },
    ]
}

fn question(id: &str, section: &str, weight: u32, text: &str) -> Question {
    Question {
        id: QuestionId::new(id),
        text: text.to_string(),
        weight,
        section: SectionId::new(section),
    }
}
