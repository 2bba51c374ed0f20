mod config;
mod rules;

pub use config::ScoringWeights;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, EducationLevel, RankingAlgorithm};
use super::features::{ApplicantFeatures, JobFeatures};
use rules::{
    composite, coverage, coverage_score, education_score, experience_score, round_score,
    title_relevance, ComponentScores,
};

/// Stateless scorer applying one set of weights to every applicant of a run.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, job: &JobFeatures, record: &ApplicantRecord) -> ScoreCard {
        let applicant = ApplicantFeatures::extract(record);

        let education = round_score(education_score(
            applicant.education_level,
            job.required_level,
        ));

        let relevance = title_relevance(&job.title_tokens, &applicant.title_tokens);
        let experience = round_score(experience_score(
            applicant.experience_years,
            job.required_years,
            relevance.unwrap_or(1.0),
        ));

        let (matched_skills, missing_skills) = coverage(&job.skills, &applicant.skills);
        let skills = round_score(coverage_score(matched_skills.len(), job.skills.len()));

        let (matched_eligibilities, missing_eligibilities) =
            coverage(&job.eligibilities, &applicant.eligibilities);
        let eligibility = round_score(coverage_score(
            matched_eligibilities.len(),
            job.eligibilities.len(),
        ));

        let components = ComponentScores {
            education,
            experience,
            skills,
            eligibility,
        };
        let match_score = round_score(composite(&components, &self.weights));

        let algorithm = if relevance.is_some() {
            RankingAlgorithm::DeterministicTitleRelevance
        } else {
            RankingAlgorithm::Deterministic
        };

        ScoreCard {
            match_score,
            education_score: education,
            experience_score: experience,
            skills_score: skills,
            eligibility_score: eligibility,
            matched_skills_count: matched_skills.len(),
            matched_eligibilities_count: matched_eligibilities.len(),
            algorithm,
            details: AlgorithmDetails {
                weights: self.weights,
                education: EducationBreakdown {
                    applicant_level: applicant.education_level,
                    required_level: job.required_level,
                    meets_requirement: applicant.education_level >= job.required_level,
                },
                experience: ExperienceBreakdown {
                    years: applicant.experience_years,
                    required_years: job.required_years,
                    meets_requirement: applicant.experience_years >= job.required_years,
                    title_relevance: relevance,
                },
                skills: CoverageBreakdown {
                    required: job.skills.len(),
                    matched: matched_skills,
                    missing: missing_skills,
                },
                eligibility: CoverageBreakdown {
                    required: job.eligibilities.len(),
                    matched: matched_eligibilities,
                    missing: missing_eligibilities,
                },
            },
        }
    }
}

/// Component and composite scores for one applicant, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub match_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub eligibility_score: f64,
    pub matched_skills_count: usize,
    pub matched_eligibilities_count: usize,
    pub algorithm: RankingAlgorithm,
    pub details: AlgorithmDetails,
}

/// Structured breakdown attached to each ranked applicant for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmDetails {
    pub weights: ScoringWeights,
    pub education: EducationBreakdown,
    pub experience: ExperienceBreakdown,
    pub skills: CoverageBreakdown,
    pub eligibility: CoverageBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationBreakdown {
    pub applicant_level: EducationLevel,
    pub required_level: EducationLevel,
    pub meets_requirement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBreakdown {
    pub years: f64,
    pub required_years: f64,
    pub meets_requirement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_relevance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageBreakdown {
    pub required: usize,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}
