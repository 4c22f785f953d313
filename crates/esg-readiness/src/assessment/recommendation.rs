use serde::{Deserialize, Serialize};

use super::definition::ConfigurationError;

/// Ordered outcome categories, lowest readiness first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLevel {
    Starter,
    Intermediate,
    Advanced,
}

impl TierLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Static narrative attached to a tier. Nothing here is computed; the
/// selector only chooses which block to hand back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTier {
    pub level: TierLevel,
    pub title: String,
    pub text: String,
    pub next_steps: Vec<String>,
}

/// One row of the threshold table. `upper_bound` is inclusive; the final
/// row carries `None` and catches everything above the last bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThreshold {
    pub upper_bound: Option<u32>,
    pub tier: RecommendationTier,
}

/// Ordered threshold table mapping a total score to a recommendation tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable(Vec<TierThreshold>);

impl TierTable {
    /// Build a table, rejecting shapes that could leave a score unmapped.
    /// This runs when a definition is assembled, never at scoring time.
    pub fn new(entries: Vec<TierThreshold>) -> Result<Self, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::EmptyTierTable);
        }

        let (last, bounded) = entries.split_last().expect("non-empty entries");
        if last.upper_bound.is_some() {
            return Err(ConfigurationError::UnboundedTierMissing);
        }

        let mut previous: Option<u32> = None;
        for entry in bounded {
            let bound = entry
                .upper_bound
                .ok_or(ConfigurationError::UnboundedTierNotLast)?;
            if let Some(prev) = previous {
                if bound <= prev {
                    return Err(ConfigurationError::NonAscendingThresholds {
                        previous: prev,
                        next: bound,
                    });
                }
            }
            previous = Some(bound);
        }

        Ok(Self(entries))
    }

    /// Ascending scan: the first tier whose upper bound covers `total` wins.
    /// The final unbounded row guarantees a match for any total.
    pub fn select(&self, total: u32) -> &RecommendationTier {
        self.0
            .iter()
            .find(|entry| entry.upper_bound.map_or(true, |bound| total <= bound))
            .map(|entry| &entry.tier)
            .expect("tier table validated non-empty with unbounded tail")
    }

    pub fn entries(&self) -> &[TierThreshold] {
        &self.0
    }

    /// Highest finite bound, used to check the table against a question
    /// set's maximum score.
    pub fn last_finite_bound(&self) -> Option<u32> {
        self.0.iter().rev().find_map(|entry| entry.upper_bound)
    }
}
