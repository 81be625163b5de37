//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `AURORA_*` environment
//! variables; the Gemini key is read from the conventional `GEMINI_API_KEY`.
//! Loaded once at process startup and treated as immutable afterwards —
//! every request sees the same collaborator handles.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::gemini::SafetyThreshold;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `AURORA_*` overrides on top of defaults,
/// then [`Config::validate`] to enforce the required fields.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Google Cloud project that owns the FAQ embedding table. Required.
    pub project_id: String,

    /// BigQuery dataset holding the FAQ embeddings. Default: `alaska_faq`.
    pub dataset: String,

    /// Embedding table inside the dataset. Default: `faq_embeddings`.
    pub table: String,

    /// Fully-qualified remote embedding model used by `ML.GENERATE_EMBEDDING`.
    pub embedding_model: String,

    /// BigQuery REST endpoint. Overridable for tests against a local stub.
    pub bigquery_url: String,

    /// OAuth access token for BigQuery, if one is provided out-of-band.
    pub bigquery_token: Option<String>,

    /// Gemini API key. Required.
    pub gemini_api_key: String,

    /// Gemini REST endpoint. Overridable for tests against a local stub.
    pub gemini_url: String,

    /// Model answering the question. Default: `gemini-1.5-pro`.
    pub responder_model: String,

    /// Safety-tuned model screening the question. Default: `gemini-1.5-flash`.
    pub validator_model: String,

    /// Harm-category threshold applied to validator calls.
    pub safety_threshold: SafetyThreshold,

    /// Deployment environment label reported by the diagnostic endpoint.
    pub environment: String,

    /// Evaluation service endpoint (offline harness only).
    pub eval_url: Option<String>,

    /// Evaluation service location. Default: `us-central1`.
    pub eval_location: String,
}

/// Default BigQuery endpoint used when `AURORA_BIGQUERY_URL` is not set.
pub const DEFAULT_BIGQUERY_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default Gemini endpoint used when `AURORA_GEMINI_URL` is not set.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            project_id: String::new(),
            dataset: "alaska_faq".to_string(),
            table: "faq_embeddings".to_string(),
            embedding_model: "alaska_faq.embedding_model".to_string(),
            bigquery_url: DEFAULT_BIGQUERY_URL.to_string(),
            bigquery_token: None,
            gemini_api_key: String::new(),
            gemini_url: DEFAULT_GEMINI_URL.to_string(),
            responder_model: "gemini-1.5-pro".to_string(),
            validator_model: "gemini-1.5-flash".to_string(),
            safety_threshold: SafetyThreshold::BlockMediumAndAbove,
            environment: "development".to_string(),
            eval_url: None,
            eval_location: "us-central1".to_string(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "AURORA_PORT";
    const ENV_BIND_ADDR: &'static str = "AURORA_BIND_ADDR";
    const ENV_PROJECT_ID: &'static str = "AURORA_PROJECT_ID";
    const ENV_DATASET: &'static str = "AURORA_BQ_DATASET";
    const ENV_TABLE: &'static str = "AURORA_BQ_TABLE";
    const ENV_EMBEDDING_MODEL: &'static str = "AURORA_EMBEDDING_MODEL";
    const ENV_BIGQUERY_URL: &'static str = "AURORA_BIGQUERY_URL";
    const ENV_BIGQUERY_TOKEN: &'static str = "AURORA_BQ_ACCESS_TOKEN";
    const ENV_GEMINI_API_KEY: &'static str = "GEMINI_API_KEY";
    const ENV_GEMINI_URL: &'static str = "AURORA_GEMINI_URL";
    const ENV_RESPONDER_MODEL: &'static str = "AURORA_RESPONDER_MODEL";
    const ENV_VALIDATOR_MODEL: &'static str = "AURORA_VALIDATOR_MODEL";
    const ENV_SAFETY_THRESHOLD: &'static str = "AURORA_SAFETY_THRESHOLD";
    const ENV_ENVIRONMENT: &'static str = "AURORA_ENVIRONMENT";
    const ENV_EVAL_URL: &'static str = "AURORA_EVAL_URL";
    const ENV_EVAL_LOCATION: &'static str = "AURORA_EVAL_LOCATION";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let safety_threshold = Self::parse_safety_threshold_from_env(defaults.safety_threshold)?;

        Ok(Self {
            port,
            bind_addr,
            project_id: Self::parse_string_from_env(Self::ENV_PROJECT_ID, defaults.project_id),
            dataset: Self::parse_string_from_env(Self::ENV_DATASET, defaults.dataset),
            table: Self::parse_string_from_env(Self::ENV_TABLE, defaults.table),
            embedding_model: Self::parse_string_from_env(
                Self::ENV_EMBEDDING_MODEL,
                defaults.embedding_model,
            ),
            bigquery_url: Self::parse_string_from_env(
                Self::ENV_BIGQUERY_URL,
                defaults.bigquery_url,
            ),
            bigquery_token: Self::parse_optional_string_from_env(Self::ENV_BIGQUERY_TOKEN),
            gemini_api_key: Self::parse_string_from_env(
                Self::ENV_GEMINI_API_KEY,
                defaults.gemini_api_key,
            ),
            gemini_url: Self::parse_string_from_env(Self::ENV_GEMINI_URL, defaults.gemini_url),
            responder_model: Self::parse_string_from_env(
                Self::ENV_RESPONDER_MODEL,
                defaults.responder_model,
            ),
            validator_model: Self::parse_string_from_env(
                Self::ENV_VALIDATOR_MODEL,
                defaults.validator_model,
            ),
            safety_threshold,
            environment: Self::parse_string_from_env(Self::ENV_ENVIRONMENT, defaults.environment),
            eval_url: Self::parse_optional_string_from_env(Self::ENV_EVAL_URL),
            eval_location: Self::parse_string_from_env(
                Self::ENV_EVAL_LOCATION,
                defaults.eval_location,
            ),
        })
    }

    /// Enforces the fields the pipeline cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_PROJECT_ID,
            });
        }
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_GEMINI_API_KEY,
            });
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Returns `true` when a Gemini API key is configured.
    pub fn api_key_set(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_safety_threshold_from_env(
        default: SafetyThreshold,
    ) -> Result<SafetyThreshold, ConfigError> {
        match env::var(Self::ENV_SAFETY_THRESHOLD) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidSafetyThreshold { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
