use super::common::*;
use serde_json::json;

use crate::workflows::ranking::domain::{
    EligibilityRecord, PdsEligibility, PdsOtherInformation, ProfileEligibility, ProfileSource,
};
use crate::workflows::ranking::normalize_application;
use crate::workflows::ranking::normalizer::parse_work_date_for_tests;

#[test]
fn application_without_sources_is_not_normalized() {
    assert!(normalize_application(&sourceless_application("app-x"), today()).is_none());
}

#[test]
fn profile_only_application_uses_profile_fields() {
    let application = profile_application("app-1", ("Ana", "Cruz"), &["Excel", "excel "], 4.25);

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.applicant_name, "Ana Cruz");
    assert_eq!(record.highest_educational_attainment, "COLLEGE - BS Statistics");
    assert_eq!(record.total_years_experience, 4.3);
    assert_eq!(record.skills, vec!["Excel".to_string()]);
    assert!(record.eligibilities.is_empty());
}

#[test]
fn pds_fields_take_precedence_over_profile() {
    let mut application = pds_application(
        "app-2",
        vec![work("Data Encoder", "2020-01-01", "2022-01-01")],
    );
    application.profile = Some(ProfileSource {
        first_name: Some("Profile".to_string()),
        surname: Some("Name".to_string()),
        highest_educational_attainment: Some("SECONDARY".to_string()),
        total_years_experience: Some(9.0),
        skills: vec!["Typing".to_string()],
        ..ProfileSource::default()
    });

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.applicant_name, "Maria Santos");
    assert_eq!(
        record.highest_educational_attainment,
        "COLLEGE - BS Information Technology"
    );
    assert_eq!(record.total_years_experience, 2.0);
    assert_eq!(record.work_experience_titles, vec!["Data Encoder".to_string()]);
    // the sheet lists no skills, so the profile list fills in
    assert_eq!(record.skills, vec!["Typing".to_string()]);
}

#[test]
fn malformed_work_date_contributes_zero_years() {
    let application = pds_application(
        "app-3",
        vec![
            work("Clerk", "invalid", "2021-01-01"),
            work("Data Encoder", "2020-01-01", "2022-01-01"),
        ],
    );

    let record = normalize_application(&application, today()).expect("record survives");

    assert_eq!(record.total_years_experience, 2.0);
    assert_eq!(record.work_experience_titles.len(), 2);
}

#[test]
fn present_end_date_resolves_to_reference_date() {
    let application = pds_application("app-4", vec![work("Analyst", "2023-06-30", "Present")]);

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.total_years_experience, 2.0);
    assert_eq!(
        parse_work_date_for_tests("PRESENT", today()),
        Some(today())
    );
}

#[test]
fn encoded_skill_string_is_decoded() {
    let mut application = pds_application("app-5", Vec::new());
    if let Some(pds) = application.pds.as_mut() {
        pds.other_information = Some(PdsOtherInformation {
            skills: Some(json!(r#"[{"skill_name":"SQL"},{"skill_name":"Power BI"}]"#)),
        });
    }

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.skills, vec!["SQL".to_string(), "Power BI".to_string()]);
}

#[test]
fn malformed_skill_payload_is_kept_as_raw_text() {
    let mut application = pds_application("app-6", Vec::new());
    if let Some(pds) = application.pds.as_mut() {
        pds.other_information = Some(PdsOtherInformation {
            skills: Some(json!("[{\"skill_name\": \"SQL\"")),
        });
    }

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.skills, vec!["[{\"skill_name\": \"SQL\"".to_string()]);
}

#[test]
fn eligibilities_prefer_pds_and_accept_profile_shapes() {
    let mut application = pds_application("app-7", Vec::new());
    if let Some(pds) = application.pds.as_mut() {
        pds.eligibility = vec![
            PdsEligibility {
                eligibility_title: Some("Career Service Professional".to_string()),
                ..PdsEligibility::default()
            },
            PdsEligibility {
                eligibility_title: Some("career service professional".to_string()),
                ..PdsEligibility::default()
            },
        ];
    }

    let record = normalize_application(&application, today()).expect("record");
    assert_eq!(
        record.eligibilities,
        vec![EligibilityRecord {
            eligibility_title: "Career Service Professional".to_string(),
        }]
    );

    let mut profile_only = profile_application("app-8", ("Ana", "Cruz"), &[], 1.0);
    if let Some(profile) = profile_only.profile.as_mut() {
        profile.eligibilities = vec![
            ProfileEligibility::Title("RA 1080".to_string()),
            ProfileEligibility::Record(EligibilityRecord {
                eligibility_title: "Sub-Professional".to_string(),
            }),
        ];
    }

    let record = normalize_application(&profile_only, today()).expect("record");
    let titles: Vec<&str> = record
        .eligibilities
        .iter()
        .map(|entry| entry.eligibility_title.as_str())
        .collect();
    assert_eq!(titles, vec!["RA 1080", "Sub-Professional"]);
}

#[test]
fn missing_names_fall_back_to_unknown() {
    let mut application = profile_application("app-9", ("  ", ""), &[], 0.0);
    if let Some(profile) = application.profile.as_mut() {
        profile.highest_educational_attainment = None;
    }

    let record = normalize_application(&application, today()).expect("record");

    assert_eq!(record.applicant_name, "Unknown");
    assert_eq!(record.highest_educational_attainment, "Not specified");
}
