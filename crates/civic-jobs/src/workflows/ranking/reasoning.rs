use super::domain::{ApplicantRecord, EducationLevel};
use super::scoring::{CoverageBreakdown, ScoreCard};

/// Prose explanation of how an applicant's requirements lined up with the posting.
pub(crate) fn explain(rank: u32, record: &ApplicantRecord, card: &ScoreCard) -> String {
    let details = &card.details;
    let mut sentences = vec![format!(
        "Ranked #{rank} with a match score of {:.2}.",
        card.match_score
    )];

    sentences.push(coverage_sentence(&details.skills, "skill", "skills"));
    sentences.push(coverage_sentence(
        &details.eligibility,
        "eligibility",
        "eligibilities",
    ));

    let experience = &details.experience;
    sentences.push(if experience.required_years <= 0.0 {
        format!(
            "No minimum experience is required; brings {:.1} year(s) of work history.",
            experience.years
        )
    } else if experience.meets_requirement {
        format!(
            "Meets the {:.1}-year experience requirement with {:.1} year(s).",
            experience.required_years, experience.years
        )
    } else {
        format!(
            "Has {:.1} year(s) of experience against the {:.1} required.",
            experience.years, experience.required_years
        )
    });

    match experience.title_relevance {
        Some(relevance) if relevance > 0.0 => {
            sentences.push("Previous position titles align with the posting.".to_string())
        }
        Some(_) => sentences.push("No previous position title matches the posting.".to_string()),
        None => {}
    }

    let education = &details.education;
    let attainment = &record.highest_educational_attainment;
    sentences.push(if education.required_level == EducationLevel::Unspecified {
        format!("No degree requirement; highest attainment is {attainment}.")
    } else if education.meets_requirement {
        format!(
            "Education ({attainment}) meets the {} requirement.",
            education.required_level.label()
        )
    } else {
        format!(
            "Education ({attainment}) is below the {} requirement.",
            education.required_level.label()
        )
    });

    sentences.join(" ")
}

fn coverage_sentence(coverage: &CoverageBreakdown, singular: &str, plural: &str) -> String {
    let matched = coverage.matched.len();
    let required = coverage.required;

    if required == 0 {
        return format!("No specific {plural} are required.");
    }

    let noun = if required == 1 { singular } else { plural };
    if matched == required {
        format!(
            "Holds all {required} required {noun} ({}).",
            coverage.matched.join(", ")
        )
    } else if matched == 0 {
        format!(
            "Holds none of the {required} required {noun} (missing {}).",
            coverage.missing.join(", ")
        )
    } else {
        format!(
            "Holds {matched} of {required} required {noun} ({}); missing {}.",
            coverage.matched.join(", "),
            coverage.missing.join(", ")
        )
    }
}
