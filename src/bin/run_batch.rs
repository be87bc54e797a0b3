//! Assess every applicant in an intake CSV against one product line
//!
//! Environment:
//! - `APPLICANTS_PATH` (default data/applicants_sample.csv)
//! - `OUTPUT_PATH` (default batch_assessment_output.csv)
//! - `UNDERWRITING_CATALOG_PATH`, `UNDERWRITING_PRODUCT_LINE`
//!
//! Writes one row per applicant and carrier, in ranked order.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use std::time::Instant;
use underwriting_estimator::applicant::load_applicants;
use underwriting_estimator::{AssessmentRunner, ProductLine, RunConfig};

const DEFAULT_APPLICANTS_PATH: &str = "data/applicants_sample.csv";
const DEFAULT_OUTPUT_PATH: &str = "batch_assessment_output.csv";

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    applicant_id: &'a str,
    product_line: ProductLine,
    rank: usize,
    carrier_id: u32,
    carrier: &'a str,
    rating: &'a str,
    severity: u8,
    declined: bool,
    summary: String,
    generated_at: DateTime<Utc>,
}

fn main() -> Result<()> {
    env_logger::init();

    let config = RunConfig::from_env()?;
    let applicants_path = env::var("APPLICANTS_PATH").unwrap_or_else(|_| DEFAULT_APPLICANTS_PATH.to_string());
    let output_path = env::var("OUTPUT_PATH").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());

    let start = Instant::now();
    println!("Loading catalog from {}...", config.catalog_path.display());
    let runner = AssessmentRunner::from_csv_path(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path.display()))?;

    let records = load_applicants(&applicants_path)
        .with_context(|| format!("Failed to load applicants from {}", applicants_path))?;
    println!("Loaded {} applicants in {:?}", records.len(), start.elapsed());

    println!("Assessing {} carriers...", config.product_line);
    let assess_start = Instant::now();
    let results = runner.assess_batch(&records, config.product_line);
    println!("Assessments complete in {:?}", assess_start.elapsed());

    let generated_at = Utc::now();
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("Failed to create {}", output_path))?;
    for result in &results {
        for (rank, outcome) in result.outcomes.iter().enumerate() {
            writer.serialize(OutputRow {
                applicant_id: &result.applicant_id,
                product_line: outcome.product_line,
                rank: rank + 1,
                carrier_id: outcome.carrier_id,
                carrier: &outcome.carrier,
                rating: outcome.rating_label.as_deref().unwrap_or("Decline"),
                severity: outcome.severity(),
                declined: outcome.declined,
                summary: outcome.summary(),
                generated_at,
            })?;
        }
    }
    writer.flush()?;
    println!("Output written to {}", output_path);

    println!("\nBatch Summary:");
    for result in &results {
        let best = result
            .outcomes
            .iter()
            .find(|o| !o.declined)
            .map(|o| format!("{} ({})", o.carrier, o.rating_label.as_deref().unwrap_or("")))
            .unwrap_or_else(|| "all carriers decline".to_string());
        let approved = result.outcomes.iter().filter(|o| !o.declined).count();
        println!(
            "  {:<10} {}/{} approve, best: {}",
            result.applicant_id,
            approved,
            result.outcomes.len(),
            best
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
