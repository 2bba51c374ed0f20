//! Feature extraction over canonical records and job requirements.

use std::collections::{BTreeMap, BTreeSet};

use super::domain::{ApplicantRecord, EducationLevel, JobRequirement};
use super::normalizer::normalize_token;

const MIN_TITLE_TOKEN_LEN: usize = 3;
const TITLE_STOPWORDS: &[&str] = &["and", "the", "for", "with", "from"];

/// Scoring inputs derived from one applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantFeatures {
    pub education_level: EducationLevel,
    pub experience_years: f64,
    pub skills: BTreeSet<String>,
    pub eligibilities: BTreeSet<String>,
    pub title_tokens: BTreeSet<String>,
}

impl ApplicantFeatures {
    pub fn extract(record: &ApplicantRecord) -> Self {
        Self {
            education_level: education_level(record),
            experience_years: experience_years(record),
            skills: skill_set(record),
            eligibilities: eligibility_set(record),
            title_tokens: record
                .work_experience_titles
                .iter()
                .flat_map(|title| title_tokens(title))
                .collect(),
        }
    }
}

pub fn education_level(record: &ApplicantRecord) -> EducationLevel {
    EducationLevel::parse(&record.highest_educational_attainment)
}

pub fn experience_years(record: &ApplicantRecord) -> f64 {
    if record.total_years_experience.is_finite() {
        record.total_years_experience.max(0.0)
    } else {
        0.0
    }
}

pub fn skill_set(record: &ApplicantRecord) -> BTreeSet<String> {
    token_set(record.skills.iter().map(String::as_str))
}

pub fn eligibility_set(record: &ApplicantRecord) -> BTreeSet<String> {
    token_set(
        record
            .eligibilities
            .iter()
            .map(|entry| entry.eligibility_title.as_str()),
    )
}

/// Requirement side of the comparison. Token maps keep the posting's spelling for display.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFeatures {
    pub required_level: EducationLevel,
    pub required_years: f64,
    pub skills: BTreeMap<String, String>,
    pub eligibilities: BTreeMap<String, String>,
    pub title_tokens: BTreeSet<String>,
}

impl JobFeatures {
    pub fn extract(job: &JobRequirement) -> Self {
        let required_level = if job.degree_requirement.trim().is_empty() {
            EducationLevel::Unspecified
        } else {
            EducationLevel::parse(&job.degree_requirement)
        };

        Self {
            required_level,
            required_years: job.years_of_experience.max(0.0),
            skills: display_map(&job.skills),
            eligibilities: display_map(&job.eligibilities),
            title_tokens: title_tokens(&job.title),
        }
    }
}

fn token_set<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

fn display_map(values: &[String]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for value in values {
        let token = normalize_token(value);
        if !token.is_empty() {
            map.entry(token).or_insert_with(|| value.trim().to_string());
        }
    }
    map
}

/// Significant lowercase words of a title, used for lexical relevance.
pub(crate) fn title_tokens(title: &str) -> BTreeSet<String> {
    normalize_token(title)
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_TITLE_TOKEN_LEN)
        .filter(|word| !TITLE_STOPWORDS.contains(word))
        .map(str::to_string)
        .collect()
}
