use std::env;

use crate::errors::ConfigError;
use crate::index::Metric;
use crate::types::{Model, ModelSource};

/// runtime configuration, resolved from the environment exactly once and
/// passed into the service clients
#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub pinecone_api_key: String,
    pub index_name: String,
    pub model: Model,
    pub metric: Metric,
    pub cloud: String,
    pub region: String,
    pub upsert_batch_size: usize,
    pub openai_base_url: Option<String>,
    pub pinecone_base_url: Option<String>,
    pub ollama_host: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let model_raw = from_env_default("COURSEVEC_MODEL", "openai/text-embedding-ada-002");
        let model = Model::new(&model_raw).map_err(|e| ConfigError::Invalid {
            key: "COURSEVEC_MODEL",
            message: e.to_string(),
        })?;

        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        if model.source == ModelSource::OpenAI && openai_api_key.is_none() {
            return Err(ConfigError::MissingEnv("OPENAI_API_KEY"));
        }

        let metric = from_env_default("COURSEVEC_METRIC", "cosine")
            .parse::<Metric>()
            .map_err(|message| ConfigError::Invalid {
                key: "COURSEVEC_METRIC",
                message,
            })?;

        let batch_raw = from_env_default("COURSEVEC_BATCH_SIZE", "100");
        let upsert_batch_size: usize =
            batch_raw.parse().map_err(|_| ConfigError::Invalid {
                key: "COURSEVEC_BATCH_SIZE",
                message: format!("expected a positive integer, got {batch_raw}"),
            })?;
        if upsert_batch_size == 0 {
            return Err(ConfigError::Invalid {
                key: "COURSEVEC_BATCH_SIZE",
                message: "batch size must be at least 1".to_string(),
            });
        }

        Ok(Config {
            openai_api_key,
            pinecone_api_key: require_env("PINECONE_API_KEY")?,
            index_name: from_env_default("COURSEVEC_INDEX", "courses"),
            model,
            metric,
            cloud: from_env_default("PINECONE_CLOUD", "aws"),
            region: from_env_default("PINECONE_REGION", "us-east-1"),
            upsert_batch_size,
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            pinecone_base_url: env::var("PINECONE_BASE_URL").ok(),
            ollama_host: env::var("OLLAMA_HOST").ok(),
        })
    }
}

/// source a variable from environment - use default if not exists
pub fn from_env_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn require_env(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key))
}
