use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scoring::AlgorithmDetails;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hiring criteria for one posting. Skills and eligibilities are treated as sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub degree_requirement: String,
    #[serde(default)]
    pub eligibilities: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub years_of_experience: f64,
}

/// Fixed total order over attainment levels. `Unspecified` covers anything unrecognized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    Unspecified,
    Elementary,
    Secondary,
    Vocational,
    College,
    GraduateStudies,
}

impl EducationLevel {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Elementary => 1,
            Self::Secondary => 2,
            Self::Vocational => 3,
            Self::College => 4,
            Self::GraduateStudies => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Elementary => "ELEMENTARY",
            Self::Secondary => "SECONDARY",
            Self::Vocational => "VOCATIONAL",
            Self::College => "COLLEGE",
            Self::GraduateStudies => "GRADUATE STUDIES",
        }
    }

    /// Classifies a level token or attainment string such as `"COLLEGE - BS Accountancy"`.
    ///
    /// The part before `" - "` is tried first so a course name cannot promote or
    /// demote the level it is attached to.
    pub fn parse(value: &str) -> Self {
        let head = value.split(" - ").next().unwrap_or_default();
        match Self::classify(head) {
            Self::Unspecified => Self::classify(value),
            level => level,
        }
    }

    fn classify(value: &str) -> Self {
        let upper = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        let has = |needle: &str| upper.contains(needle);

        if has("GRADUATE STUDIES")
            || has("GRADUATE SCHOOL")
            || has("POST GRADUATE")
            || has("POSTGRADUATE")
            || has("MASTER")
            || has("DOCTOR")
            || has("PHD")
            || has("PH.D")
        {
            Self::GraduateStudies
        } else if has("COLLEGE") || has("BACHELOR") || has("UNIVERSITY") || has("TERTIARY") {
            Self::College
        } else if has("VOCATIONAL") || has("TRADE COURSE") || has("TESDA") {
            Self::Vocational
        } else if has("SECONDARY") || has("HIGH SCHOOL") {
            Self::Secondary
        } else if has("ELEMENTARY") || has("PRIMARY") {
            Self::Elementary
        } else {
            Self::Unspecified
        }
    }
}

/// One pending application as handed over by the batch lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApplication {
    pub application_id: ApplicationId,
    pub applicant_id: String,
    #[serde(default)]
    pub applicant_profile_id: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileSource>,
    #[serde(default)]
    pub pds: Option<PdsSource>,
}

impl RawApplication {
    /// Resolves which data sources are attached; `None` means the application cannot be ranked.
    pub fn sources(&self) -> Option<ApplicantSources<'_>> {
        match (self.profile.as_ref(), self.pds.as_ref()) {
            (Some(profile), Some(pds)) => Some(ApplicantSources::Both { profile, pds }),
            (Some(profile), None) => Some(ApplicantSources::Profile(profile)),
            (None, Some(pds)) => Some(ApplicantSources::Pds(pds)),
            (None, None) => None,
        }
    }
}

/// Data sources available for one application.
#[derive(Debug, Clone, Copy)]
pub enum ApplicantSources<'a> {
    Profile(&'a ProfileSource),
    Pds(&'a PdsSource),
    Both {
        profile: &'a ProfileSource,
        pds: &'a PdsSource,
    },
}

impl<'a> ApplicantSources<'a> {
    pub fn pds(self) -> Option<&'a PdsSource> {
        match self {
            Self::Pds(pds) | Self::Both { pds, .. } => Some(pds),
            Self::Profile(_) => None,
        }
    }

    pub fn profile(self) -> Option<&'a ProfileSource> {
        match self {
            Self::Profile(profile) | Self::Both { profile, .. } => Some(profile),
            Self::Pds(_) => None,
        }
    }
}

/// Flat, pre-aggregated applicant profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSource {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub highest_educational_attainment: Option<String>,
    pub total_years_experience: Option<f64>,
    pub skills: Vec<String>,
    pub eligibilities: Vec<ProfileEligibility>,
    pub work_experience_titles: Vec<String>,
}

/// Profiles store eligibilities either as bare titles or as records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileEligibility {
    Title(String),
    Record(EligibilityRecord),
}

impl ProfileEligibility {
    pub fn title(&self) -> &str {
        match self {
            Self::Title(title) => title,
            Self::Record(record) => &record.eligibility_title,
        }
    }
}

/// Personal Data Sheet with its structured sub-documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsSource {
    pub personal_information: Option<PdsPersonalInformation>,
    pub educational_background: Vec<PdsEducationEntry>,
    pub work_experience: Vec<PdsWorkExperience>,
    pub other_information: Option<PdsOtherInformation>,
    pub eligibility: Vec<PdsEligibility>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsPersonalInformation {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsEducationEntry {
    pub level: Option<String>,
    pub name_of_school: Option<String>,
    pub basic_education_degree_course: Option<String>,
    pub year_graduated: Option<String>,
}

/// Work history row; dates are kept raw because the sheet accepts free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsWorkExperience {
    pub position_title: Option<String>,
    pub department_agency: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// The skills sub-document arrives in several shapes and is parsed by `SkillPayload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsOtherInformation {
    pub skills: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdsEligibility {
    pub eligibility_title: Option<String>,
    pub rating: Option<String>,
    pub date_of_exam: Option<String>,
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub eligibility_title: String,
}

/// Canonical applicant built fresh for every ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub application_id: ApplicationId,
    pub applicant_id: String,
    pub applicant_profile_id: Option<String>,
    pub applicant_name: String,
    pub highest_educational_attainment: String,
    pub total_years_experience: f64,
    pub skills: Vec<String>,
    pub eligibilities: Vec<EligibilityRecord>,
    pub work_experience_titles: Vec<String>,
}

/// Scoring path that produced a ranked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingAlgorithm {
    Deterministic,
    DeterministicTitleRelevance,
}

impl RankingAlgorithm {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::DeterministicTitleRelevance => "deterministic_title_relevance",
        }
    }
}

/// Output row of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedApplicant {
    #[serde(flatten)]
    pub applicant: ApplicantRecord,
    pub rank: u32,
    pub match_score: f64,
    pub education_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub eligibility_score: f64,
    pub matched_skills_count: usize,
    pub matched_eligibilities_count: usize,
    pub algorithm_used: RankingAlgorithm,
    pub ranking_reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_details: Option<AlgorithmDetails>,
}

/// A job together with its pending applications, as accepted by the CLI and the inline endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingDocument {
    pub job: JobRequirement,
    #[serde(default)]
    pub applications: Vec<RawApplication>,
}
