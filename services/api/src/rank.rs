use crate::infra::load_documents;
use chrono::{Local, NaiveDate};
use civic_jobs::config::AppConfig;
use civic_jobs::error::AppError;
use civic_jobs::workflows::ranking::{RankingDocument, RankingEngine, RankingOutcome};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding a `{job, applications}` document (or a list of them)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Reference date for "Present" work-history entries (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs { input, today, json } = args;

    let config = AppConfig::load()?;
    let engine = RankingEngine::new(config.ranking.weights);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    for document in load_documents(&input)? {
        let outcome = rank_document(&engine, &document, today)?;
        if json {
            let payload = serde_json::json!({
                "job_id": document.job.id,
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            print!("{}", render_table(&document, &outcome, today));
        }
    }

    Ok(())
}

fn rank_document(
    engine: &RankingEngine,
    document: &RankingDocument,
    today: NaiveDate,
) -> Result<RankingOutcome, AppError> {
    Ok(engine.rank(&document.job, &document.applications, today)?)
}

pub(crate) fn render_table(
    document: &RankingDocument,
    outcome: &RankingOutcome,
    today: NaiveDate,
) -> String {
    let job = &document.job;
    let mut out = format!(
        "Ranking for {} ({}) as of {}\n",
        job.title, job.id, today
    );
    out.push_str(&format!(
        "{} application(s) submitted, status: {}\n",
        document.applications.len(),
        outcome.status_label()
    ));

    if outcome.is_empty() {
        out.push_str("Nothing to rank.\n");
        return out;
    }

    out.push_str(&format!(
        "{:>4}  {:<28} {:>7} {:>7} {:>7} {:>7} {:>7}\n",
        "Rank", "Applicant", "Match", "Educ", "Exp", "Skills", "Elig"
    ));
    for entry in outcome.applicants() {
        out.push_str(&format!(
            "{:>4}  {:<28} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}\n",
            entry.rank,
            truncate(&entry.applicant.applicant_name, 28),
            entry.match_score,
            entry.education_score,
            entry.experience_score,
            entry.skills_score,
            entry.eligibility_score
        ));
        out.push_str(&format!("      {}\n", entry.ranking_reasoning));
    }
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
