use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use aurora::gemini::CompletionModel;
use aurora::pipeline::ValidationStatus;
use aurora::retrieval::KnowledgeSearch;

use crate::gateway::error::GatewayError;
use crate::gateway::state::{AppState, Diagnostics};

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
    pub context_found: bool,
    pub validation_status: ValidationStatus,
    pub error: Option<String>,
}

/// Runs one question through the pipeline.
///
/// Expected failure modes (safety block, retrieval miss, generation error)
/// come back as normal 200 payloads; only an empty question (400) or a
/// broken pipeline invariant (500) map to error statuses.
#[instrument(skip(state, request))]
pub async fn ask_handler<M, K>(
    State(state): State<AppState<M, K>>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, GatewayError>
where
    M: CompletionModel + Clone + Send + Sync + 'static,
    K: KnowledgeSearch + Clone + Send + Sync + 'static,
{
    let question = request.question.trim();
    if question.is_empty() {
        return Err(GatewayError::EmptyQuestion);
    }

    debug!(question, "processing question");

    let outcome = state.pipeline.ask(question).await;

    // the pipeline guarantees a non-empty answer on every exit path
    if outcome.answer.is_empty() {
        return Err(GatewayError::Internal(
            "pipeline produced an empty answer".to_string(),
        ));
    }

    Ok(Json(QuestionResponse {
        question: question.to_string(),
        answer: outcome.answer,
        context_found: outcome.context_found,
        validation_status: outcome.validation_status,
        error: outcome.error,
    }))
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub bigquery_connected: bool,
    pub gemini_connected: bool,
    pub validator_connected: bool,
    pub environment: EnvironmentInfo,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentInfo {
    pub project_id: String,
    pub api_key_set: bool,
    pub name: String,
}

/// Diagnostic endpoint reporting which collaborators are configured.
#[instrument(skip(state))]
pub async fn test_handler<M, K>(State(state): State<AppState<M, K>>) -> Json<TestResponse>
where
    M: CompletionModel + Clone + Send + Sync + 'static,
    K: KnowledgeSearch + Clone + Send + Sync + 'static,
{
    let Diagnostics {
        bigquery_connected,
        gemini_connected,
        validator_connected,
        project_id,
        api_key_set,
        environment,
    } = state.diagnostics.clone();

    Json(TestResponse {
        bigquery_connected,
        gemini_connected,
        validator_connected,
        environment: EnvironmentInfo {
            project_id,
            api_key_set,
            name: environment,
        },
    })
}
