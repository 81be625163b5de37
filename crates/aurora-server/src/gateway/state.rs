use std::sync::Arc;

use aurora::config::Config;
use aurora::gemini::CompletionModel;
use aurora::pipeline::Pipeline;
use aurora::retrieval::KnowledgeSearch;

/// Shared, read-only request state. Built once at startup; every request
/// sees the same collaborator handles.
#[derive(Clone)]
pub struct AppState<
    M: CompletionModel + Clone + Send + Sync + 'static,
    K: KnowledgeSearch + Clone + Send + Sync + 'static,
> {
    pub pipeline: Arc<Pipeline<M, K>>,

    pub diagnostics: Diagnostics,
}

impl<M, K> AppState<M, K>
where
    M: CompletionModel + Clone + Send + Sync + 'static,
    K: KnowledgeSearch + Clone + Send + Sync + 'static,
{
    pub fn new(pipeline: Pipeline<M, K>, diagnostics: Diagnostics) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            diagnostics,
        }
    }
}

/// Snapshot of collaborator configuration for the diagnostic endpoint.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub bigquery_connected: bool,
    pub gemini_connected: bool,
    pub validator_connected: bool,
    pub project_id: String,
    pub api_key_set: bool,
    pub environment: String,
}

impl Diagnostics {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bigquery_connected: !config.project_id.trim().is_empty(),
            gemini_connected: config.api_key_set(),
            validator_connected: config.api_key_set(),
            project_id: config.project_id.clone(),
            api_key_set: config.api_key_set(),
            environment: config.environment.clone(),
        }
    }
}
