//! Offline evaluation driver.
//!
//! Replays the fixed question set through the pipeline (static passage
//! table in place of the live index) and submits the batch to the external
//! evaluation service. `--quick` skips the service and prints response vs
//! reference for the first three questions instead.

use anyhow::{Context, bail};
use chrono::Utc;

use aurora::config::Config;
use aurora::evaluation::{EvalService, EvaluationHarness, experiment_name};
use aurora::gemini::GeminiClient;
use aurora::pipeline::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let quick = std::env::args().any(|arg| arg == "--quick");

    let config = Config::from_env()?;
    config.validate()?;

    let gemini = GeminiClient::new(&config.gemini_url, &config.gemini_api_key);
    let harness = EvaluationHarness::new(gemini, PipelineConfig::from_config(&config));

    if quick {
        run_quick(&harness).await;
        return Ok(());
    }

    let Some(eval_url) = config.eval_url.clone() else {
        bail!("AURORA_EVAL_URL is not set; run with --quick for a local evaluation");
    };

    println!(
        "Building evaluation dataset ({} questions)...",
        aurora::evaluation::evaluation_cases().len()
    );
    let dataset = harness.build_dataset().await;

    let service = EvalService::new(&eval_url, &config.eval_location);
    let experiment = experiment_name(Utc::now());

    println!("Running evaluation '{experiment}' (this may take a few minutes)...");
    let summary = service
        .evaluate(&dataset, &experiment)
        .await
        .context("evaluation service call failed")?;

    println!("\nResults summary");
    println!("{}", "=".repeat(60));
    for (metric, score) in &summary.summary_metrics {
        println!("{metric}: {score:.3}");
    }

    Ok(())
}

async fn run_quick(harness: &EvaluationHarness<GeminiClient>) {
    println!("Running quick local evaluation\n");

    for result in harness.run_quick(3).await {
        println!("{}", "=".repeat(60));
        println!("Question:  {}", result.question);
        println!("Response:  {}", result.response);
        println!("Reference: {}", result.reference);
    }
}
