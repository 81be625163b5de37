//! Offline evaluation harness.
//!
//! Not part of the serving path. Replays a fixed question set through the
//! same validate → retrieve → generate pipeline — with the static passage
//! table standing in for the live index, since no BigQuery connection is
//! guaranteed offline — then submits the assembled batch to an external
//! evaluation service that scores groundedness, instruction following,
//! safety, and summarization quality.

pub mod error;


pub use error::EvalError;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::info;

use crate::constants::{EVAL_METRICS, RESPONDER_INSTRUCTION};
use crate::gemini::CompletionModel;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::retrieval::StaticKnowledgeSearch;

/// One evaluation question with its reference answer.
#[derive(Debug, Clone, Copy)]
pub struct EvalCase {
    pub question: &'static str,
    /// Key into the static passage table used as the reference context.
    pub context_key: &'static str,
    pub reference: &'static str,
}

/// The fixed evaluation set.
pub fn evaluation_cases() -> &'static [EvalCase] {
    EVALUATION_CASES
}

const EVALUATION_CASES: &[EvalCase] = &[
    EvalCase {
        question: "What are the snow removal procedures?",
        context_key: "snow_removal",
        reference: "Crews plow Priority 1 routes first, then arterial streets and school \
                    zones; residential streets are cleared within 72 hours after snowfall \
                    ends, and vehicles parked on posted snow routes are towed.",
    },
    EvalCase {
        question: "How do I report hazardous road conditions?",
        context_key: "road_conditions",
        reference: "Call the 511 dispatch line; reports are triaged by severity and highway \
                    hazards get a crew response within two hours.",
    },
    EvalCase {
        question: "What are the winter emergency protocols?",
        context_key: "emergency_protocols",
        reference: "During a declared winter emergency, travel advisories are broadcast, \
                    lifeline corridors keep one lane open, and stranded-motorist patrols \
                    run every four hours on rural highways.",
    },
    EvalCase {
        question: "When do emergency shelters open?",
        context_key: "emergency_shelters",
        reference: "Warming shelters open when the temperature falls below -20 degrees \
                    Fahrenheit or a blizzard warning is issued; locations are announced \
                    through the borough alert system.",
    },
    EvalCase {
        question: "How quickly are main roads cleared after snowfall?",
        context_key: "plow_priority",
        reference: "Main roads are cleared within 24 hours after snowfall ends, following \
                    the published plowing priority order.",
    },
];

/// One row submitted to the evaluation service. All fields are non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub instruction: String,
    pub context: String,
    pub response: String,
    pub reference: String,
}

/// Response vs reference pair produced by quick (local) evaluation.
#[derive(Debug, Clone)]
pub struct QuickResult {
    pub question: String,
    pub response: String,
    pub reference: String,
}

/// Replays the pipeline over the fixed evaluation set.
pub struct EvaluationHarness<M: CompletionModel + Clone> {
    pipeline: Pipeline<M, StaticKnowledgeSearch>,
    knowledge: StaticKnowledgeSearch,
}

impl<M: CompletionModel + Clone> EvaluationHarness<M> {
    pub fn new(model: M, config: PipelineConfig) -> Self {
        let knowledge = StaticKnowledgeSearch::alaska_winter_faq();
        Self {
            pipeline: Pipeline::new(model, knowledge.clone(), config),
            knowledge,
        }
    }

    /// Builds the full evaluation dataset: one record per case, with the
    /// generated answer as `response` and the case's passage as context.
    pub async fn build_dataset(&self) -> Vec<EvaluationRecord> {
        let mut records = Vec::with_capacity(EVALUATION_CASES.len());

        for case in EVALUATION_CASES {
            let outcome = self.pipeline.ask(case.question).await;
            info!(question = case.question, "generated evaluation response");

            let passage = self
                .knowledge
                .passage(case.context_key)
                .unwrap_or("No context found");

            records.push(EvaluationRecord {
                instruction: RESPONDER_INSTRUCTION.to_string(),
                context: format!(
                    "Question: {}\nRetrieved Information: {}",
                    case.question, passage
                ),
                response: outcome.answer,
                reference: case.reference.to_string(),
            });
        }

        records
    }

    /// Quick local evaluation over the first `limit` cases, without the
    /// external scoring service.
    pub async fn run_quick(&self, limit: usize) -> Vec<QuickResult> {
        let mut results = Vec::new();

        for case in EVALUATION_CASES.iter().take(limit) {
            let outcome = self.pipeline.ask(case.question).await;
            results.push(QuickResult {
                question: case.question.to_string(),
                response: outcome.answer,
                reference: case.reference.to_string(),
            });
        }

        results
    }
}

/// Per-metric aggregate scores returned by the evaluation service.
#[derive(Debug, Clone)]
pub struct EvalSummary {
    pub summary_metrics: BTreeMap<String, f64>,
}

#[derive(Clone)]
/// Client for the external batch-evaluation service.
pub struct EvalService {
    client: reqwest::Client,
    endpoint: String,
    location: String,
}

impl EvalService {
    pub fn new(endpoint: &str, location: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            location: location.to_string(),
        }
    }

    /// Submits the full batch and returns per-metric aggregates.
    pub async fn evaluate(
        &self,
        dataset: &[EvaluationRecord],
        experiment: &str,
    ) -> Result<EvalSummary, EvalError> {
        let body = json!({
            "experiment": experiment,
            "location": self.location,
            "metrics": EVAL_METRICS,
            "dataset": dataset,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| EvalError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| EvalError::Request {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(EvalError::Http {
                status: status.as_u16(),
                message: body_text.chars().take(200).collect(),
            });
        }

        let body: Value =
            serde_json::from_str(&body_text).map_err(|e| EvalError::ResponseParse {
                message: format!("invalid JSON in response: {e}"),
            })?;

        parse_summary(&body)
    }
}

pub(crate) fn parse_summary(body: &Value) -> Result<EvalSummary, EvalError> {
    let metrics = body["summary_metrics"]
        .as_object()
        .ok_or_else(|| EvalError::ResponseParse {
            message: "missing 'summary_metrics' object".to_string(),
        })?;

    let summary_metrics = metrics
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|score| (name.clone(), score)))
        .collect();

    Ok(EvalSummary { summary_metrics })
}

/// Timestamped experiment name for one evaluation run.
pub fn experiment_name(now: DateTime<Utc>) -> String {
    format!("alaska-faq-rag-evaluation-{}", now.format("%Y%m%d-%H%M%S"))
}
