use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// one row of the course catalog. all fields are plain text; optional
/// fields that are absent from the input default to an empty string
/// instead of failing the load.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CourseRecord {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub course_slug: String,
    #[serde(default)]
    pub course_technology: String,
    #[serde(default)]
    pub course_topic: String,
    #[serde(default)]
    pub course_description_short: String,
}

impl CourseRecord {
    /// the display payload stored alongside each vector
    pub fn metadata(&self) -> CourseMetadata {
        CourseMetadata {
            course_name: self.course_name.clone(),
            technology: self.course_technology.clone(),
            description: self.course_description_short.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CourseMetadata {
    pub course_name: String,
    pub technology: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Model {
    pub source: ModelSource,
    pub name: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid model source")]
    InvalidSource,
    #[error("Invalid model format: {0}")]
    InvalidFormat(String),
}

impl Model {
    pub fn new(input: &str) -> Result<Self, ModelError> {
        let mut parts: Vec<&str> = input.split('/').collect();
        let missing_source = parts.len() != 2;
        if missing_source && parts[0] == "text-embedding-ada-002" {
            // bare model name accepted for the default model
            parts.insert(0, "openai");
        } else if missing_source {
            return Err(ModelError::InvalidFormat(input.to_string()));
        }

        let source = parts[0]
            .parse::<ModelSource>()
            .map_err(|_| ModelError::InvalidSource)?;

        Ok(Self {
            source,
            name: parts[1].to_string(),
        })
    }

    /// the model name as the serving API expects it
    pub fn api_name(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.name)
    }
}

// model sources are places that serve embedding models
// each source has its own API schema
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ModelSource {
    OpenAI,
    Ollama,
}

impl FromStr for ModelSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ModelSource::OpenAI),
            "ollama" => Ok(ModelSource::Ollama),
            _ => Err(format!("Invalid value: {}", s)),
        }
    }
}

impl Display for ModelSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            ModelSource::OpenAI => write!(f, "openai"),
            ModelSource::Ollama => write!(f, "ollama"),
        }
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn test_valid_model_openai() {
        let model = Model::new("openai/text-embedding-3-small").unwrap();
        assert_eq!(model.source, ModelSource::OpenAI);
        assert_eq!(model.name, "text-embedding-3-small");
    }

    #[test]
    fn test_valid_model_ollama() {
        let model = Model::new("ollama/nomic-embed-text").unwrap();
        assert_eq!(model.source, ModelSource::Ollama);
        assert_eq!(model.name, "nomic-embed-text");
    }

    #[test]
    fn test_invalid_model_source() {
        assert!(Model::new("invalidsource/model-name").is_err());
    }

    #[test]
    fn test_invalid_format_no_slash() {
        assert!(Model::new("openaimodel-name").is_err());
    }

    #[test]
    fn test_invalid_format_extra_slash() {
        assert!(Model::new("openai/model/name").is_err());
    }

    #[test]
    fn test_bare_default_model() {
        let model = Model::new("text-embedding-ada-002").unwrap();
        assert_eq!(model.source, ModelSource::OpenAI);
        assert_eq!(model.name, "text-embedding-ada-002");
    }

    #[test]
    fn test_display_round_trip() {
        let model = Model::new("ollama/all-minilm").unwrap();
        assert_eq!(model.to_string(), "ollama/all-minilm");
    }
}
