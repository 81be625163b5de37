//! Knowledge-base retrieval.
//!
//! Production retrieval is one top-1 `VECTOR_SEARCH` query against a
//! precomputed FAQ embedding table in BigQuery; the question is embedded
//! server-side with `ML.GENERATE_EMBEDDING`. Only a single candidate is
//! ever requested — no client-side reranking or multi-candidate fusion.
//!
//! [`StaticKnowledgeSearch`] backs the offline evaluation harness, which
//! must run without a live index.

pub mod error;
pub mod static_kb;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::SearchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockKnowledgeSearch;
pub use static_kb::StaticKnowledgeSearch;

use serde_json::{Value, json};

use crate::config::Config;

/// The vector-search collaborator: top-1 lookup of the passage most similar
/// to the question, or `None` on a miss.
pub trait KnowledgeSearch: Send + Sync {
    /// Searches the knowledge base for the passage closest to `question`.
    fn search(
        &self,
        question: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, SearchError>> + Send;
}

/// Number of nearest neighbors requested per query.
const TOP_K: u32 = 1;

#[derive(Clone)]
/// BigQuery `VECTOR_SEARCH` client over the `jobs.query` REST endpoint.
pub struct BigQuerySearch {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    dataset: String,
    table: String,
    embedding_model: String,
    access_token: Option<String>,
}

impl BigQuerySearch {
    /// Creates a search client from service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.bigquery_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
            table: config.table.clone(),
            embedding_model: config.embedding_model.clone(),
            access_token: config.bigquery_token.clone(),
        }
    }

    /// The `VECTOR_SEARCH` statement. The question travels as the named
    /// parameter `@question`; table and model identifiers come from trusted
    /// configuration.
    fn search_sql(&self) -> String {
        format!(
            "SELECT query.query, base.content \
             FROM VECTOR_SEARCH( \
                 TABLE `{dataset}.{table}`, \
                 'ml_generate_embedding_result', \
                 ( \
                     SELECT ml_generate_embedding_result, content AS query \
                     FROM ML.GENERATE_EMBEDDING( \
                         MODEL `{model}`, \
                         (SELECT @question AS content) \
                     ) \
                 ), \
                 top_k => {top_k}, \
                 options => '{{\"fraction_lists_to_search\": 0.01}}' \
             )",
            dataset = self.dataset,
            table = self.table,
            model = self.embedding_model,
            top_k = TOP_K,
        )
    }

    fn request_body(&self, question: &str) -> Value {
        json!({
            "query": self.search_sql(),
            "useLegacySql": false,
            "parameterMode": "NAMED",
            "queryParameters": [{
                "name": "question",
                "parameterType": {"type": "STRING"},
                "parameterValue": {"value": question},
            }],
        })
    }

    async fn run_query(&self, question: &str) -> Result<Option<String>, SearchError> {
        let url = format!("{}/projects/{}/queries", self.base_url, self.project_id);

        let mut request = self.client.post(&url).json(&self.request_body(question));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| SearchError::Request {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| SearchError::Request {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        let body: Value =
            serde_json::from_str(&body_text).map_err(|e| SearchError::ResponseParse {
                message: format!("invalid JSON in response: {e}"),
            })?;

        if body["jobComplete"].as_bool() == Some(false) {
            return Err(SearchError::Incomplete);
        }

        Ok(first_content_row(&body))
    }

    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> SearchError {
        match status.as_u16() {
            401 | 403 => SearchError::AuthFailed,
            code => SearchError::Http {
                status: code,
                message: body_text.chars().take(200).collect(),
            },
        }
    }
}

/// Extracts the `content` column of the first result row, if any.
///
/// `jobs.query` encodes rows as `{"f": [{"v": ...}, ...]}` in column order;
/// the search statement selects `(query, content)`, so content is field 1.
pub(crate) fn first_content_row(body: &Value) -> Option<String> {
    let row = body["rows"].as_array()?.first()?;
    let fields = row["f"].as_array()?;
    fields.get(1)?["v"].as_str().map(|s| s.to_string())
}

impl KnowledgeSearch for BigQuerySearch {
    async fn search(&self, question: &str) -> Result<Option<String>, SearchError> {
        self.run_query(question).await
    }
}
