use std::collections::{BTreeMap, BTreeSet};

use super::super::domain::EducationLevel;
use super::config::ScoringWeights;

pub(crate) const FULL_SCORE: f64 = 100.0;

// Education below the requirement tops out under this ceiling.
const EDUCATION_SHORTFALL_CEILING: f64 = 75.0;

// Experience bands. Meeting the requirement always lands in [80, 100]; falling
// short always lands in [0, 70), so the bands never overlap.
const EXPERIENCE_MEETS_FLOOR: f64 = 80.0;
const EXPERIENCE_SURPLUS_SPAN: f64 = 10.0;
const EXPERIENCE_SHORTFALL_SPAN: f64 = 60.0;
const TITLE_RELEVANCE_SPAN: f64 = 10.0;
const SURPLUS_HORIZON_YEARS: f64 = 5.0;

pub(crate) fn education_score(applicant: EducationLevel, required: EducationLevel) -> f64 {
    if required == EducationLevel::Unspecified || applicant >= required {
        return FULL_SCORE;
    }

    EDUCATION_SHORTFALL_CEILING * f64::from(applicant.rank()) / f64::from(required.rank())
}

/// Experience score for `years` against `required_years`.
///
/// `relevance` is the title-relevance factor in [0, 1]; it only moves the
/// score within the band the years already placed it in.
pub(crate) fn experience_score(years: f64, required_years: f64, relevance: f64) -> f64 {
    let relevance = relevance.clamp(0.0, 1.0);

    if years >= required_years {
        let surplus = if required_years > 0.0 {
            (years - required_years) / required_years
        } else {
            years / SURPLUS_HORIZON_YEARS
        };
        EXPERIENCE_MEETS_FLOOR
            + EXPERIENCE_SURPLUS_SPAN * surplus.clamp(0.0, 1.0)
            + TITLE_RELEVANCE_SPAN * relevance
    } else {
        let ratio = (years / required_years).clamp(0.0, 1.0);
        // ratio < 1 here, so the result stays under 70
        EXPERIENCE_SHORTFALL_SPAN * ratio + TITLE_RELEVANCE_SPAN * relevance
    }
}

/// Share of required items matched, scaled to [0, 100]. No requirements means full marks.
pub(crate) fn coverage_score(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return FULL_SCORE;
    }

    FULL_SCORE * matched.min(required) as f64 / required as f64
}

/// Splits the requirement map into matched and missing display names.
pub(crate) fn coverage(
    required: &BTreeMap<String, String>,
    held: &BTreeSet<String>,
) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for (token, display) in required {
        if held.contains(token) {
            matched.push(display.clone());
        } else {
            missing.push(display.clone());
        }
    }
    (matched, missing)
}

/// Fraction of the posting's title words found in any previous position title.
///
/// `None` when the posting title carries no significant words.
pub(crate) fn title_relevance(
    job_tokens: &BTreeSet<String>,
    applicant_tokens: &BTreeSet<String>,
) -> Option<f64> {
    if job_tokens.is_empty() {
        return None;
    }

    let hits = job_tokens
        .iter()
        .filter(|token| applicant_tokens.contains(*token))
        .count();
    Some(hits as f64 / job_tokens.len() as f64)
}

pub(crate) struct ComponentScores {
    pub education: f64,
    pub experience: f64,
    pub skills: f64,
    pub eligibility: f64,
}

pub(crate) fn composite(scores: &ComponentScores, weights: &ScoringWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let weighted = scores.education * weights.education
        + scores.experience * weights.experience
        + scores.skills * weights.skills
        + scores.eligibility * weights.eligibility;

    (weighted / total).clamp(0.0, FULL_SCORE)
}

/// Rounds to two decimals so equal inputs compare exactly equal in the ranker.
pub(crate) fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
