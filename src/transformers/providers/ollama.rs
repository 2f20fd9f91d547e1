use super::{EmbeddingProvider, GenericEmbeddingRequest, GenericEmbeddingResponse};
use crate::errors::{ConfigError, CoursevecError};
use async_trait::async_trait;
use ollama_rs::Ollama;
use url::Url;

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    pub model_name: String,
    pub instance: Ollama,
}

impl OllamaProvider {
    pub fn new(model_name: String, url: &str) -> Result<Self, CoursevecError> {
        let parsed_url = Url::parse(url).map_err(|e| ConfigError::Invalid {
            key: "OLLAMA_HOST",
            message: format!("invalid url {url}: {e}"),
        })?;
        let host = parsed_url.host_str().ok_or_else(|| ConfigError::Invalid {
            key: "OLLAMA_HOST",
            message: format!("url {url} has no host"),
        })?;
        let port = parsed_url.port_or_known_default().unwrap_or(11434);
        let instance = Ollama::new(format!("{}://{}", parsed_url.scheme(), host), port);
        Ok(OllamaProvider {
            model_name,
            instance,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn generate_embedding<'a>(
        &self,
        request: &'a GenericEmbeddingRequest,
    ) -> Result<GenericEmbeddingResponse, CoursevecError> {
        // the ollama embeddings endpoint takes one prompt per call
        let mut all_embeddings: Vec<Vec<f64>> = Vec::with_capacity(request.input.len());
        for ipt in request.input.iter() {
            let embed = self
                .instance
                .generate_embeddings(self.model_name.clone(), ipt.clone(), None)
                .await?;
            all_embeddings.push(embed.embeddings);
        }
        Ok(GenericEmbeddingResponse {
            embeddings: all_embeddings,
        })
    }

    async fn model_dim(&self, model_name: &str) -> Result<u32, CoursevecError> {
        let dim = match model_name {
            "nomic-embed-text" => 768,
            "mxbai-embed-large" => 1024,
            "all-minilm" => 384,
            _ => 768,
        };
        Ok(dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(OllamaProvider::new("nomic-embed-text".to_string(), "not a url").is_err());
    }

    #[test]
    fn test_new_accepts_host_url() {
        assert!(OllamaProvider::new("nomic-embed-text".to_string(), "http://127.0.0.1:11434").is_ok());
    }
}
