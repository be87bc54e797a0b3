//! AWS Lambda handler for applicant assessments
//!
//! Accepts an applicant profile via JSON and returns the ranked carrier outcomes
//! for one product line. The catalog is loaded once per cold start.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::{DateTime, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use underwriting_estimator::{
    ApplicantProfile, AssessmentOutcome, AssessmentRunner, ProductLine, RunConfig,
};

/// Input for one assessment
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    /// Product line to rank (default: `UNDERWRITING_PRODUCT_LINE`, else IUL)
    #[serde(default)]
    pub product_line: Option<ProductLine>,

    pub applicant: ApplicantProfile,
}

/// Ranked outcomes for the requested product line
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub product_line: ProductLine,
    pub carrier_count: usize,
    pub approved_count: usize,
    pub outcomes: Vec<AssessmentOutcome>,
    pub generated_at: DateTime<Utc>,
    pub execution_time_ms: u64,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(with_cors(Response::builder().status(status))
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &AssessmentResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder().status(200))
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(
    runner: &AssessmentRunner,
    default_line: ProductLine,
    event: Request,
) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder().status(200)).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: AssessmentRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let profile = request.applicant.normalized();
    if let Err(e) = runner.catalog().check_profile(&profile) {
        return error_response(400, &e.to_string());
    }

    let product_line = request.product_line.unwrap_or(default_line);
    let outcomes = runner.assess(&profile, product_line);

    let response = AssessmentResponse {
        product_line,
        carrier_count: outcomes.len(),
        approved_count: outcomes.iter().filter(|o| !o.declined).count(),
        outcomes,
        generated_at: Utc::now(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = RunConfig::from_env()?;
    let runner = match AssessmentRunner::from_csv_path(&config.catalog_path) {
        Ok(runner) => Arc::new(runner),
        Err(e) => {
            error!("Failed to load catalog from {}: {}", config.catalog_path.display(), e);
            return Err(e.into());
        }
    };
    info!(
        "Catalog ready: {} carriers, default product line {}",
        runner.catalog().carriers().len(),
        config.product_line
    );

    let default_line = config.product_line;
    run(service_fn(move |event: Request| {
        let runner = Arc::clone(&runner);
        async move { handler(&runner, default_line, event).await }
    }))
    .await
}
