//! Underwriting Estimator CLI
//!
//! Enter an applicant's factors and see which carriers would likely approve,
//! and at what rating.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use underwriting_estimator::catalog::ConditionCategory;
use underwriting_estimator::ranking::ProductLineAssessment;
use underwriting_estimator::{
    ApplicantProfile, AssessmentOutcome, AssessmentRunner, ProductLine, RunConfig,
};

#[derive(Debug, Parser)]
#[command(name = "underwriting_estimator", version, about = "Estimate carrier approval and risk class for an applicant")]
struct Cli {
    /// Catalog directory (default: UNDERWRITING_CATALOG_PATH or data/catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank carriers for one applicant
    Assess(AssessArgs),
    /// List carriers in the catalog
    Carriers {
        #[arg(long, value_parser = parse_product_line)]
        product_line: Option<ProductLine>,
    },
    /// List the condition taxonomy
    Conditions,
}

#[derive(Debug, Args)]
struct AssessArgs {
    /// Product line (IUL, Term, Final Expense); default: UNDERWRITING_PRODUCT_LINE or IUL
    #[arg(long, value_parser = parse_product_line)]
    product_line: Option<ProductLine>,

    /// Rank every product line
    #[arg(long, conflicts_with = "product_line")]
    all_lines: bool,

    #[arg(long)]
    age: Option<u32>,

    /// Height in inches
    #[arg(long, requires = "weight")]
    height: Option<f64>,

    /// Weight in pounds
    #[arg(long, requires = "height")]
    weight: Option<f64>,

    /// BMI, used when height and weight are not given
    #[arg(long)]
    bmi: Option<f64>,

    #[arg(long)]
    tobacco: bool,

    #[arg(long)]
    diabetes: bool,

    #[arg(long)]
    hypertension: bool,

    /// Years since cancer treatment (999 = none)
    #[arg(long)]
    cancer_years: Option<u32>,

    /// Years since last DUI (999 = none)
    #[arg(long)]
    dui_years: Option<u32>,

    /// Disclosed condition code; repeat or comma-separate
    #[arg(long = "condition", value_delimiter = ',')]
    conditions: Vec<String>,
}

fn parse_product_line(s: &str) -> Result<ProductLine, String> {
    s.parse()
}

impl AssessArgs {
    fn profile(&self) -> ApplicantProfile {
        let mut profile = ApplicantProfile {
            age: self.age,
            height_inches: self.height,
            weight_lbs: self.weight,
            stated_bmi: self.bmi,
            tobacco: self.tobacco,
            diabetes: self.diabetes,
            hypertension: self.hypertension,
            cancer_years_ago: self.cancer_years,
            dui_years_ago: self.dui_years,
            ..ApplicantProfile::default()
        };
        for code in &self.conditions {
            profile = profile.with_condition(code.as_str());
        }
        profile.normalized()
    }
}

fn print_outcomes(line: ProductLine, outcomes: &[AssessmentOutcome]) {
    println!("{} ({} carriers)", line, outcomes.len());
    println!("{:<40} {:<16} {}", "Carrier", "Rating", "Notes");
    println!("{}", "-".repeat(100));
    for outcome in outcomes {
        println!(
            "{:<40} {:<16} {}",
            outcome.carrier,
            outcome.rating_label.as_deref().unwrap_or("Decline"),
            outcome.summary()
        );
    }
    println!();
}

fn assess(runner: &AssessmentRunner, config: &RunConfig, args: &AssessArgs, json: bool) -> Result<()> {
    let profile = args.profile();
    runner
        .catalog()
        .check_profile(&profile)
        .context("Invalid applicant")?;

    let assessments: Vec<ProductLineAssessment> = if args.all_lines {
        runner.assess_all(&profile)
    } else {
        let product_line = args.product_line.unwrap_or(config.product_line);
        vec![ProductLineAssessment {
            product_line,
            outcomes: runner.assess(&profile, product_line),
        }]
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&assessments)?);
        return Ok(());
    }

    if let Some(bmi) = profile.bmi() {
        println!("BMI: {:.1}\n", bmi);
    }
    for assessment in &assessments {
        print_outcomes(assessment.product_line, &assessment.outcomes);
    }
    Ok(())
}

fn list_carriers(runner: &AssessmentRunner, product_line: Option<ProductLine>, json: bool) -> Result<()> {
    let carriers: Vec<_> = runner
        .catalog()
        .carriers()
        .iter()
        .filter(|c| product_line.map_or(true, |line| c.product_line == line))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&carriers)?);
        return Ok(());
    }

    println!("{:>3} {:<40} {:<14} {:>7} {:<6}", "ID", "Carrier", "Line", "Ages", "Chart");
    println!("{}", "-".repeat(74));
    for carrier in carriers {
        println!(
            "{:>3} {:<40} {:<14} {:>3}-{:<3} {:<6}",
            carrier.id,
            carrier.name,
            carrier.product_line.as_str(),
            carrier.min_age,
            carrier.max_age,
            if carrier.build_chart.is_some() { "yes" } else { "" }
        );
    }
    Ok(())
}

fn list_conditions(runner: &AssessmentRunner, json: bool) -> Result<()> {
    let conditions: Vec<_> = runner.catalog().conditions().iter().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&conditions)?);
        return Ok(());
    }

    for category in [ConditionCategory::Knockout, ConditionCategory::Declinable] {
        println!("{:?}:", category);
        for condition in conditions.iter().filter(|c| c.category == category) {
            println!("  {:<24} {}", condition.code.as_str(), condition.name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = RunConfig::from_env()?;
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if !config.catalog_path.is_dir() {
        bail!("Catalog directory not found: {}", config.catalog_path.display());
    }

    let runner = AssessmentRunner::from_csv_path(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path.display()))?;

    match &cli.command {
        Command::Assess(args) => assess(&runner, &config, args, cli.json),
        Command::Carriers { product_line } => list_carriers(&runner, *product_line, cli.json),
        Command::Conditions => list_conditions(&runner, cli.json),
    }
}
