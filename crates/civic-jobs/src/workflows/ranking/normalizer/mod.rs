//! Builds the canonical applicant record from the profile and PDS sources.
//!
//! Each field is resolved independently: the PDS value wins when it yields
//! anything, otherwise the profile value is used. An application with neither
//! source never produces a record.

mod education;
mod experience;
mod skills;
mod text;

pub use skills::SkillPayload;

pub(crate) use text::normalize_token;

use chrono::NaiveDate;

use super::domain::{
    ApplicantRecord, EligibilityRecord, PdsSource, ProfileEligibility, ProfileSource,
    RawApplication,
};
use text::{clean_text, dedupe_preserving_order};

pub(crate) const UNKNOWN_APPLICANT: &str = "Unknown";
pub(crate) const NOT_SPECIFIED: &str = "Not specified";

/// Canonical record for `application`, or `None` when it carries no data source.
///
/// `today` stands in for `"Present"` in work-history end dates.
pub fn normalize_application(
    application: &RawApplication,
    today: NaiveDate,
) -> Option<ApplicantRecord> {
    let sources = application.sources()?;
    let pds = sources.pds();
    let profile = sources.profile();

    Some(ApplicantRecord {
        application_id: application.application_id.clone(),
        applicant_id: application.applicant_id.clone(),
        applicant_profile_id: application.applicant_profile_id.clone(),
        applicant_name: applicant_name(pds, profile),
        highest_educational_attainment: education::highest_attainment(pds, profile),
        total_years_experience: experience::total_years(pds, profile, today),
        skills: skills(pds, profile),
        eligibilities: eligibilities(pds, profile),
        work_experience_titles: work_experience_titles(pds, profile),
    })
}

fn applicant_name(pds: Option<&PdsSource>, profile: Option<&ProfileSource>) -> String {
    let personal = pds.and_then(|pds| pds.personal_information.as_ref());
    let first_name = personal
        .and_then(|info| info.first_name.as_deref())
        .and_then(clean_text)
        .or_else(|| {
            profile
                .and_then(|profile| profile.first_name.as_deref())
                .and_then(clean_text)
        });
    let surname = personal
        .and_then(|info| info.surname.as_deref())
        .and_then(clean_text)
        .or_else(|| {
            profile
                .and_then(|profile| profile.surname.as_deref())
                .and_then(clean_text)
        });

    let joined = format!(
        "{} {}",
        first_name.unwrap_or_default(),
        surname.unwrap_or_default()
    );
    clean_text(&joined).unwrap_or_else(|| UNKNOWN_APPLICANT.to_string())
}

fn skills(pds: Option<&PdsSource>, profile: Option<&ProfileSource>) -> Vec<String> {
    let from_pds = pds
        .and_then(|pds| pds.other_information.as_ref())
        .and_then(|other| other.skills.as_ref())
        .map(|value| SkillPayload::classify(value).into_skills())
        .unwrap_or_default();

    if !from_pds.is_empty() {
        return from_pds;
    }

    profile
        .map(|profile| dedupe_preserving_order(&profile.skills))
        .unwrap_or_default()
}

fn eligibilities(
    pds: Option<&PdsSource>,
    profile: Option<&ProfileSource>,
) -> Vec<EligibilityRecord> {
    let from_pds = pds
        .map(|pds| {
            dedupe_preserving_order(
                pds.eligibility
                    .iter()
                    .filter_map(|entry| entry.eligibility_title.as_deref()),
            )
        })
        .unwrap_or_default();

    let titles = if from_pds.is_empty() {
        profile
            .map(|profile| {
                dedupe_preserving_order(profile.eligibilities.iter().map(ProfileEligibility::title))
            })
            .unwrap_or_default()
    } else {
        from_pds
    };

    titles
        .into_iter()
        .map(|eligibility_title| EligibilityRecord { eligibility_title })
        .collect()
}

fn work_experience_titles(
    pds: Option<&PdsSource>,
    profile: Option<&ProfileSource>,
) -> Vec<String> {
    let from_pds: Vec<String> = pds
        .map(|pds| {
            pds.work_experience
                .iter()
                .filter_map(|entry| entry.position_title.as_deref())
                .filter_map(clean_text)
                .collect()
        })
        .unwrap_or_default();

    if !from_pds.is_empty() {
        return from_pds;
    }

    profile
        .map(|profile| {
            profile
                .work_experience_titles
                .iter()
                .filter_map(|title| clean_text(title))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn parse_work_date_for_tests(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    experience::parse_work_date(value, today)
}
