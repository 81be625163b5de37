//! Aurora library crate (used by the server, the evaluation driver, and
//! integration tests).
//!
//! Answering a question is a strictly linear, three-stage pipeline, each
//! stage a single call to an external AI service:
//!
//! 1. [`Validator`] — submits the raw question to a safety-tuned Gemini
//!    model and inspects the structured finish reason to accept or reject.
//! 2. [`KnowledgeSearch`] — one top-1 `VECTOR_SEARCH` query against the
//!    precomputed FAQ embedding table in BigQuery.
//! 3. [`Responder`] — one generative call constrained to the retrieved
//!    passage.
//!
//! [`Pipeline`] composes the three stages and maps every expected failure
//! mode (safety block, empty retrieval, generation error) into a normal
//! return value; callers branch on [`AskOutcome`], never on caught errors.
//!
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod evaluation;
pub mod gemini;
pub mod pipeline;
pub mod responder;
pub mod retrieval;
pub mod validator;

pub use config::{Config, ConfigError};
pub use evaluation::{
    EvalError, EvalService, EvalSummary, EvaluationHarness, EvaluationRecord, experiment_name,
};
pub use gemini::{
    Completion, CompletionModel, FinishReason, GeminiClient, GeminiError, GenerateRequest,
    SafetyThreshold,
};
#[cfg(any(test, feature = "mock"))]
pub use gemini::MockCompletionModel;
pub use pipeline::{AskOutcome, Pipeline, PipelineConfig, ValidationStatus};
pub use responder::Responder;
pub use retrieval::{BigQuerySearch, KnowledgeSearch, SearchError, StaticKnowledgeSearch};
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockKnowledgeSearch;
pub use validator::{ValidationOutcome, Validator};
