use std::cmp::Ordering;

use super::domain::{ApplicantRecord, RankedApplicant};
use super::reasoning::explain;
use super::scoring::ScoreCard;

/// An applicant with its score card, waiting for a rank.
#[derive(Debug, Clone)]
pub struct ScoredApplicant {
    pub record: ApplicantRecord,
    pub card: ScoreCard,
}

/// Orders the batch and assigns dense ranks starting at 1.
///
/// Ties on the composite fall through experience, education, case-insensitive
/// name, and finally application id, so input order never decides a rank.
pub fn rank_scored(mut scored: Vec<ScoredApplicant>) -> Vec<RankedApplicant> {
    scored.sort_by(compare);

    scored
        .into_iter()
        .enumerate()
        .map(|(position, ScoredApplicant { record, card })| {
            let rank = position as u32 + 1;
            let ranking_reasoning = explain(rank, &record, &card);
            RankedApplicant {
                applicant: record,
                rank,
                match_score: card.match_score,
                education_score: card.education_score,
                experience_score: card.experience_score,
                skills_score: card.skills_score,
                eligibility_score: card.eligibility_score,
                matched_skills_count: card.matched_skills_count,
                matched_eligibilities_count: card.matched_eligibilities_count,
                algorithm_used: card.algorithm,
                ranking_reasoning,
                algorithm_details: Some(card.details),
            }
        })
        .collect()
}

fn compare(left: &ScoredApplicant, right: &ScoredApplicant) -> Ordering {
    right
        .card
        .match_score
        .total_cmp(&left.card.match_score)
        .then_with(|| {
            right
                .card
                .experience_score
                .total_cmp(&left.card.experience_score)
        })
        .then_with(|| {
            right
                .card
                .education_score
                .total_cmp(&left.card.education_score)
        })
        .then_with(|| {
            left.record
                .applicant_name
                .to_lowercase()
                .cmp(&right.record.applicant_name.to_lowercase())
        })
        .then_with(|| left.record.application_id.cmp(&right.record.application_id))
}
