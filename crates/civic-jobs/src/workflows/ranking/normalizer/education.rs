use super::super::domain::{EducationLevel, PdsEducationEntry, PdsSource, ProfileSource};
use super::text::clean_text;
use super::NOT_SPECIFIED;

/// Highest attainment string: best PDS entry, then the profile's value, then `"Not specified"`.
pub(super) fn highest_attainment(
    pds: Option<&PdsSource>,
    profile: Option<&ProfileSource>,
) -> String {
    pds.and_then(|pds| highest_entry(&pds.educational_background))
        .or_else(|| {
            profile
                .and_then(|profile| profile.highest_educational_attainment.as_deref())
                .and_then(clean_text)
        })
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Picks the highest-ranked entry with a non-empty level; the earliest entry wins ties.
fn highest_entry(entries: &[PdsEducationEntry]) -> Option<String> {
    let mut best: Option<(EducationLevel, &PdsEducationEntry, String)> = None;

    for entry in entries {
        let Some(level) = entry.level.as_deref().and_then(clean_text) else {
            continue;
        };
        let parsed = EducationLevel::parse(&level);
        if matches!(&best, Some((current, _, _)) if *current >= parsed) {
            continue;
        }
        best = Some((parsed, entry, level));
    }

    best.map(|(_, entry, level)| {
        match entry
            .basic_education_degree_course
            .as_deref()
            .and_then(clean_text)
        {
            Some(course) => format!("{level} - {course}"),
            None => level,
        }
    })
}
