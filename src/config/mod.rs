//! Configuration for provider adapters

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use secrecy::{Secret, ExposeSecret};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cloudflare: Option<CloudflareConfig>,

    #[serde(default)]
    pub mistral: Option<MistralConfig>,

    #[serde(default)]
    pub together: Option<TogetherConfig>,

    #[serde(default)]
    pub nomic: Option<NomicConfig>,

    #[serde(default)]
    pub cohere: Option<CohereConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Transport settings shared by every adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Additional attempts after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            headers: HashMap::new(),
        }
    }
}

/// Cloudflare Workers AI embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareConfig {
    /// API token (secured)
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_token: Secret<String>,

    #[serde(default = "default_cloudflare_model")]
    pub model_name: String,

    /// Account used with the public endpoint; exclusive with `gateway_endpoint`
    #[serde(default)]
    pub account_id: Option<String>,

    /// AI Gateway URL used instead of the public endpoint
    #[serde(default)]
    pub gateway_endpoint: Option<String>,

    /// Largest batch accepted by the endpoint schema
    #[serde(default = "default_cloudflare_batch_size")]
    pub max_batch_size: usize,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Mistral AI embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralConfig {
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    #[serde(default = "default_mistral_model")]
    pub model_name: String,

    #[serde(default = "default_mistral_url")]
    pub api_url: String,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Together AI embeddings and reranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherConfig {
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    #[serde(default = "default_together_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_together_rerank_model")]
    pub rerank_model: String,

    #[serde(default = "default_together_url")]
    pub base_url: String,

    /// Return relevance scores instead of `1 - score` distances
    #[serde(default)]
    pub raw_scores: bool,

    #[serde(default)]
    pub top_n: Option<usize>,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Nomic Atlas embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NomicConfig {
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    #[serde(default = "default_nomic_model")]
    pub model_name: String,

    #[serde(default = "default_nomic_url")]
    pub api_url: String,

    #[serde(default = "default_nomic_dimensionality")]
    pub dimensionality: Option<usize>,

    #[serde(default = "default_nomic_max_tokens")]
    pub max_tokens_per_text: Option<usize>,

    #[serde(default = "default_nomic_long_text_mode")]
    pub long_text_mode: Option<LongTextMode>,

    #[serde(default = "default_nomic_task_type")]
    pub task_type: Option<TaskType>,

    #[serde(default = "default_nomic_http")]
    pub http: HttpConfig,
}

/// How Nomic treats texts longer than the token limit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LongTextMode {
    #[default]
    Truncate,
    Mean,
}

/// Nomic embedding task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    SearchDocument,
    SearchQuery,
    Classification,
    Clustering,
}

/// Cohere reranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereConfig {
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    #[serde(default = "default_cohere_model")]
    pub model_name: String,

    #[serde(default = "default_cohere_url")]
    pub api_url: String,

    #[serde(default)]
    pub raw_scores: bool,

    #[serde(default)]
    pub top_n: Option<usize>,

    #[serde(default = "default_cohere_max_tokens")]
    pub max_tokens_per_document: Option<usize>,

    #[serde(default = "default_rerank_http")]
    pub http: HttpConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 { 30 }
fn default_max_retries() -> u32 { 3 }
fn default_cloudflare_model() -> String { "@cf/baai/bge-base-en-v1.5".to_string() }
fn default_cloudflare_batch_size() -> usize { 100 }
fn default_mistral_model() -> String { "mistral-embed".to_string() }
fn default_mistral_url() -> String { "https://api.mistral.ai/v1/embeddings".to_string() }
fn default_together_embedding_model() -> String { "togethercomputer/m2-bert-80M-8k-retrieval".to_string() }
fn default_together_rerank_model() -> String { "Salesforce/Llama-Rank-V1".to_string() }
fn default_together_url() -> String { "https://api.together.xyz/v1".to_string() }
fn default_nomic_model() -> String { "nomic-embed-text-v1.5".to_string() }
fn default_nomic_url() -> String { "https://api-atlas.nomic.ai/v1/embedding/text".to_string() }
fn default_nomic_dimensionality() -> Option<usize> { Some(768) }
fn default_nomic_max_tokens() -> Option<usize> { Some(8192) }
fn default_nomic_long_text_mode() -> Option<LongTextMode> { Some(LongTextMode::Truncate) }
fn default_nomic_task_type() -> Option<TaskType> { Some(TaskType::SearchDocument) }
fn default_cohere_model() -> String { "rerank-v3.5".to_string() }
fn default_cohere_url() -> String { "https://api.cohere.com/v2/rerank".to_string() }
fn default_cohere_max_tokens() -> Option<usize> { Some(4096) }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

// Nomic and the rerank SDKs default to a 60s timeout
fn default_nomic_http() -> HttpConfig {
    HttpConfig { timeout_secs: 60, ..HttpConfig::default() }
}

fn default_rerank_http() -> HttpConfig {
    HttpConfig { timeout_secs: 60, ..HttpConfig::default() }
}

fn env_secret(var: &str) -> crate::error::Result<Secret<String>> {
    dotenvy::dotenv().ok();
    std::env::var(var)
        .map(Secret::new)
        .map_err(|_| crate::error::ExtrasError::Config(format!(
            "API key is required. Please set the {} environment variable or pass it directly.",
            var
        )))
}

impl CloudflareConfig {
    /// Build from `CF_API_TOKEN` and `CF_ACCOUNT_ID` / `CF_GATEWAY_ENDPOINT`
    pub fn from_env() -> crate::error::Result<Self> {
        let api_token = env_secret("CF_API_TOKEN")?;
        Ok(Self {
            api_token,
            model_name: default_cloudflare_model(),
            account_id: std::env::var("CF_ACCOUNT_ID").ok(),
            gateway_endpoint: std::env::var("CF_GATEWAY_ENDPOINT").ok(),
            max_batch_size: default_cloudflare_batch_size(),
            http: HttpConfig::default(),
        })
    }

    pub fn with_account(api_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_token: Secret::new(api_token.into()),
            model_name: default_cloudflare_model(),
            account_id: Some(account_id.into()),
            gateway_endpoint: None,
            max_batch_size: default_cloudflare_batch_size(),
            http: HttpConfig::default(),
        }
    }

    pub fn with_gateway(api_token: impl Into<String>, gateway_endpoint: impl Into<String>) -> Self {
        Self {
            account_id: None,
            gateway_endpoint: Some(gateway_endpoint.into()),
            ..Self::with_account(api_token, String::new())
        }
    }
}

impl MistralConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model_name: default_mistral_model(),
            api_url: default_mistral_url(),
            http: HttpConfig::default(),
        }
    }

    /// Build from `MISTRAL_API_KEY`
    pub fn from_env() -> crate::error::Result<Self> {
        let key = env_secret("MISTRAL_API_KEY")?;
        Ok(Self { api_key: key, ..Self::new(String::new()) })
    }
}

impl TogetherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            embedding_model: default_together_embedding_model(),
            rerank_model: default_together_rerank_model(),
            base_url: default_together_url(),
            raw_scores: false,
            top_n: None,
            http: HttpConfig { timeout_secs: 60, ..HttpConfig::default() },
        }
    }

    /// Build from `TOGETHER_API_KEY`
    pub fn from_env() -> crate::error::Result<Self> {
        let key = env_secret("TOGETHER_API_KEY")?;
        Ok(Self { api_key: key, ..Self::new(String::new()) })
    }
}

impl NomicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model_name: default_nomic_model(),
            api_url: default_nomic_url(),
            dimensionality: default_nomic_dimensionality(),
            max_tokens_per_text: default_nomic_max_tokens(),
            long_text_mode: default_nomic_long_text_mode(),
            task_type: default_nomic_task_type(),
            http: default_nomic_http(),
        }
    }

    /// Build from `NOMIC_API_KEY`
    pub fn from_env() -> crate::error::Result<Self> {
        let key = env_secret("NOMIC_API_KEY")?;
        Ok(Self { api_key: key, ..Self::new(String::new()) })
    }
}

impl CohereConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model_name: default_cohere_model(),
            api_url: default_cohere_url(),
            raw_scores: false,
            top_n: None,
            max_tokens_per_document: default_cohere_max_tokens(),
            http: default_rerank_http(),
        }
    }

    /// Build from `COHERE_API_KEY`
    pub fn from_env() -> crate::error::Result<Self> {
        let key = env_secret("COHERE_API_KEY")?;
        Ok(Self { api_key: key, ..Self::new(String::new()) })
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config_with_env(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }

    /// Create default configuration with no providers enabled
    pub fn default_config() -> Self {
        Self {
            cloudflare: None,
            mistral: None,
            together: None,
            nomic: None,
            cohere: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Custom serializer for Secret<String>
fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}
