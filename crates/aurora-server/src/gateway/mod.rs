//! HTTP gateway (Axum) for the question-answering pipeline.
//!
//! This module is primarily used by the `aurora` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::ask_handler;
pub use state::{AppState, Diagnostics};

use aurora::constants::{SAMPLE_QUESTIONS, SERVICE_NAME};
use aurora::gemini::CompletionModel;
use aurora::retrieval::KnowledgeSearch;

pub fn create_router_with_state<M, K>(state: AppState<M, K>) -> Router
where
    M: CompletionModel + Clone + Send + Sync + 'static,
    K: KnowledgeSearch + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health_handler))
        .route("/ask", post(handler::ask_handler))
        .route("/test", get(handler::test_handler))
        .route("/sample-questions", get(sample_questions_handler))
        .layer(TraceLayer::new_for_http())
        // the FAQ frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(serde::Serialize)]
pub struct SampleQuestionsResponse {
    pub questions: Vec<&'static str>,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tracing::instrument]
pub async fn sample_questions_handler() -> Json<SampleQuestionsResponse> {
    Json(SampleQuestionsResponse {
        questions: SAMPLE_QUESTIONS.to_vec(),
    })
}
