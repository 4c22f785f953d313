use super::common::*;
use crate::assessment::definition::{AssessmentDefinition, ConfigurationError};
use crate::assessment::domain::{Question, Section, SectionId};
use crate::assessment::recommendation::{
    RecommendationTier, TierLevel, TierTable, TierThreshold,
};

fn tier(level: TierLevel) -> RecommendationTier {
    RecommendationTier {
        level,
        title: format!("{} title", level.label()),
        text: "text".to_string(),
        next_steps: Vec::new(),
    }
}

fn three_tier_table(first_bound: u32, second_bound: u32) -> TierTable {
    TierTable::new(vec![
        TierThreshold {
            upper_bound: Some(first_bound),
            tier: tier(TierLevel::Starter),
        },
        TierThreshold {
            upper_bound: Some(second_bound),
            tier: tier(TierLevel::Intermediate),
        },
        TierThreshold {
            upper_bound: None,
            tier: tier(TierLevel::Advanced),
        },
    ])
    .expect("ascending three tier table")
}

#[test]
fn boundaries_are_inclusive_on_the_lower_tier() {
    let table = three_tier_table(6, 12);

    assert_eq!(table.select(0).level, TierLevel::Starter);
    assert_eq!(table.select(6).level, TierLevel::Starter);
    assert_eq!(table.select(7).level, TierLevel::Intermediate);
    assert_eq!(table.select(12).level, TierLevel::Intermediate);
    assert_eq!(table.select(13).level, TierLevel::Advanced);
    assert_eq!(table.select(17).level, TierLevel::Advanced);
}

#[test]
fn every_total_maps_to_exactly_one_tier() {
    let table = three_tier_table(6, 12);
    for total in 0..=20 {
        let level = table.select(total).level;
        let expected = if total <= 6 {
            TierLevel::Starter
        } else if total <= 12 {
            TierLevel::Intermediate
        } else {
            TierLevel::Advanced
        };
        assert_eq!(level, expected, "total {total}");
    }
}

#[test]
fn standard_definition_maps_extremes_to_outer_tiers() {
    let definition = definition();
    let tiers = definition.tiers();

    assert_eq!(tiers.select(0).level, TierLevel::Starter);
    assert_eq!(
        tiers.select(definition.max_possible()).level,
        TierLevel::Advanced
    );
}

#[test]
fn rejects_empty_table() {
    let err = TierTable::new(Vec::new()).expect_err("empty table");
    assert_eq!(err, ConfigurationError::EmptyTierTable);
}

#[test]
fn rejects_table_without_unbounded_tail() {
    let err = TierTable::new(vec![
        TierThreshold {
            upper_bound: Some(6),
            tier: tier(TierLevel::Starter),
        },
        TierThreshold {
            upper_bound: Some(12),
            tier: tier(TierLevel::Intermediate),
        },
    ])
    .expect_err("table must end unbounded");
    assert_eq!(err, ConfigurationError::UnboundedTierMissing);
}

#[test]
fn rejects_unbounded_entry_before_the_tail() {
    let err = TierTable::new(vec![
        TierThreshold {
            upper_bound: None,
            tier: tier(TierLevel::Starter),
        },
        TierThreshold {
            upper_bound: None,
            tier: tier(TierLevel::Advanced),
        },
    ])
    .expect_err("only the tail may be unbounded");
    assert_eq!(err, ConfigurationError::UnboundedTierNotLast);
}

#[test]
fn rejects_non_ascending_bounds() {
    let err = TierTable::new(vec![
        TierThreshold {
            upper_bound: Some(12),
            tier: tier(TierLevel::Starter),
        },
        TierThreshold {
            upper_bound: Some(6),
            tier: tier(TierLevel::Intermediate),
        },
        TierThreshold {
            upper_bound: None,
            tier: tier(TierLevel::Advanced),
        },
    ])
    .expect_err("descending bounds");
    assert_eq!(
        err,
        ConfigurationError::NonAscendingThresholds {
            previous: 12,
            next: 6
        }
    );
}

#[test]
fn definition_rejects_duplicate_question_ids() {
    let sections = vec![Section {
        id: SectionId::new("s1"),
        title: "Del 1".to_string(),
    }];
    let questions = vec![
        sample_question("q1", "s1", 1),
        sample_question("q1", "s1", 1),
    ];

    let err = AssessmentDefinition::new("dup", sections, questions, three_tier_table(0, 1))
        .expect_err("duplicate ids");
    assert_eq!(err, ConfigurationError::DuplicateQuestionId("q1".to_string()));
}

#[test]
fn definition_rejects_zero_weight() {
    let sections = vec![Section {
        id: SectionId::new("s1"),
        title: "Del 1".to_string(),
    }];
    let questions = vec![sample_question("q1", "s1", 0)];

    let err = AssessmentDefinition::new("zero", sections, questions, three_tier_table(0, 1))
        .expect_err("zero weight");
    assert_eq!(
        err,
        ConfigurationError::ZeroWeight {
            question: "q1".to_string()
        }
    );
}

#[test]
fn definition_rejects_unknown_section() {
    let sections = vec![Section {
        id: SectionId::new("s1"),
        title: "Del 1".to_string(),
    }];
    let questions = vec![sample_question("q1", "s9", 1)];

    let err = AssessmentDefinition::new("dangling", sections, questions, three_tier_table(0, 1))
        .expect_err("unknown section");
    assert!(matches!(err, ConfigurationError::UnknownSection { .. }));
}

#[test]
fn definition_rejects_threshold_at_or_above_max() {
    let sections = vec![Section {
        id: SectionId::new("s1"),
        title: "Del 1".to_string(),
    }];
    let questions = vec![
        sample_question("q1", "s1", 1),
        sample_question("q2", "s1", 1),
    ];

    let err = AssessmentDefinition::new("beyond", sections, questions, three_tier_table(1, 2))
        .expect_err("top tier unreachable");
    assert_eq!(
        err,
        ConfigurationError::ThresholdBeyondMax {
            bound: 2,
            max_possible: 2
        }
    );
}

#[test]
fn built_in_definitions_validate() {
    let standard = AssessmentDefinition::standard();
    assert_eq!(standard.question_count(), 13);
    assert_eq!(standard.max_possible(), 17);

    let classic = AssessmentDefinition::classic();
    assert_eq!(classic.question_count(), 13);
    assert_eq!(classic.max_possible(), 13);
    assert_eq!(classic.tiers().select(5).level, TierLevel::Starter);
    assert_eq!(classic.tiers().select(9).level, TierLevel::Intermediate);
    assert_eq!(classic.tiers().select(10).level, TierLevel::Advanced);
}

fn sample_question(id: &str, section: &str, weight: u32) -> Question {
    Question {
        id: question_id(id),
        text: format!("Question {id}"),
        weight,
        section: SectionId::new(section),
    }
}
