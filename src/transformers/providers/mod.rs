pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, CoursevecError};
use crate::transformers::providers;
use crate::transformers::types::Inputs;
use crate::types::{Model, ModelSource};

#[async_trait]
pub trait EmbeddingProvider {
    async fn generate_embedding<'a>(
        &self,
        request: &'a GenericEmbeddingRequest,
    ) -> Result<GenericEmbeddingResponse, CoursevecError>;
    async fn model_dim(&self, model_name: &str) -> Result<u32, CoursevecError>;
}

#[derive(Clone, Deserialize, Debug, Serialize)]
pub struct GenericEmbeddingRequest {
    pub input: Vec<String>,
    pub model: String,
}

#[derive(Deserialize, Debug)]
pub struct GenericEmbeddingResponse {
    pub embeddings: Vec<Vec<f64>>,
}

pub fn prepare_generic_embedding_request(
    model: &Model,
    inputs: &[Inputs],
) -> GenericEmbeddingRequest {
    let text_inputs = providers::openai::trim_inputs(inputs);

    GenericEmbeddingRequest {
        input: text_inputs,
        model: model.api_name(),
    }
}

pub fn get_provider(
    model: &Model,
    api_key: Option<String>,
    openai_url: Option<String>,
    ollama_url: Option<String>,
) -> Result<Box<dyn EmbeddingProvider>, CoursevecError> {
    match model.source {
        ModelSource::OpenAI => {
            let api_key = api_key.ok_or(ConfigError::MissingEnv("OPENAI_API_KEY"))?;
            Ok(Box::new(providers::openai::OpenAIProvider::new(
                openai_url, api_key,
            )))
        }
        ModelSource::Ollama => {
            let url = ollama_url.unwrap_or_else(|| providers::ollama::OLLAMA_BASE_URL.to_string());
            Ok(Box::new(providers::ollama::OllamaProvider::new(
                model.api_name(),
                &url,
            )?))
        }
    }
}

fn split_vector(vec: Vec<String>, chunk_size: usize) -> Vec<Vec<String>> {
    vec.chunks(chunk_size).map(|chunk| chunk.to_vec()).collect()
}
