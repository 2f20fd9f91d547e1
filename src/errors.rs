use anyhow::Error as AnyhowError;
use ollama_rs::error::OllamaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum CoursevecError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("An internal error occurred: {0}")]
    InternalError(#[from] AnyhowError),
    #[error("ollama error: {0}")]
    OllamaError(#[from] OllamaError),
}
