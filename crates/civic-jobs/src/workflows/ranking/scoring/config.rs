use serde::{Deserialize, Serialize};

use super::super::RankingError;

/// Relative weights of the four component scores in the composite.
///
/// Weights are normalized by their sum, so only their ratios matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub education: f64,
    pub experience: f64,
    pub skills: f64,
    pub eligibility: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            education: 0.20,
            experience: 0.30,
            skills: 0.35,
            eligibility: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.education + self.experience + self.skills + self.eligibility
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        let named = [
            ("education", self.education),
            ("experience", self.experience),
            ("skills", self.skills),
            ("eligibility", self.eligibility),
        ];

        if let Some((name, value)) = named
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(RankingError::InvalidWeights(format!(
                "{name} weight must be a non-negative number, got {value}"
            )));
        }

        if self.total() <= 0.0 {
            return Err(RankingError::InvalidWeights(
                "at least one weight must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
