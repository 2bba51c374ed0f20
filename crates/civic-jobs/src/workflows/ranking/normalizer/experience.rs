use chrono::{DateTime, NaiveDate};
use tracing::warn;

use super::super::domain::{PdsSource, PdsWorkExperience, ProfileSource};
use super::text::clean_text;

const DAYS_PER_YEAR: f64 = 365.25;
const PRESENT: &str = "present";
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Total experience in years, rounded to one decimal.
///
/// PDS work history wins whenever it has entries, even if none of them parse;
/// the profile total is only used when the sheet lists no work at all.
pub(super) fn total_years(
    pds: Option<&PdsSource>,
    profile: Option<&ProfileSource>,
    today: NaiveDate,
) -> f64 {
    match pds.filter(|pds| !pds.work_experience.is_empty()) {
        Some(pds) => years_from_entries(&pds.work_experience, today),
        None => profile
            .and_then(|profile| profile.total_years_experience)
            .filter(|years| years.is_finite())
            .map(|years| round_tenths(years.max(0.0)))
            .unwrap_or(0.0),
    }
}

fn years_from_entries(entries: &[PdsWorkExperience], today: NaiveDate) -> f64 {
    let total: f64 = entries.iter().map(|entry| entry_years(entry, today)).sum();
    round_tenths(total)
}

fn entry_years(entry: &PdsWorkExperience, today: NaiveDate) -> f64 {
    let from_raw = entry.from.as_deref().and_then(clean_text);
    let to_raw = entry.to.as_deref().and_then(clean_text);
    let (Some(from_raw), Some(to_raw)) = (from_raw, to_raw) else {
        return 0.0;
    };

    let (Some(from), Some(to)) = (
        parse_work_date(&from_raw, today),
        parse_work_date(&to_raw, today),
    ) else {
        warn!(
            position = entry.position_title.as_deref().unwrap_or_default(),
            from = %from_raw,
            to = %to_raw,
            "skipping work experience with unparseable dates"
        );
        return 0.0;
    };

    let days = (to - from).num_days() as f64;
    (days / DAYS_PER_YEAR).max(0.0)
}

/// Parses a work-history date. `"Present"` resolves to `today`.
pub(super) fn parse_work_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.eq_ignore_ascii_case(PRESENT) {
        return Some(today);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
