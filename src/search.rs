use std::fmt::Write;

use log::info;

use crate::config::Config;
use crate::errors::CoursevecError;
use crate::index::types::SearchMatch;
use crate::index::PineconeClient;
use crate::transformers::providers::{self, GenericEmbeddingRequest};
use crate::types::CourseMetadata;

#[derive(Clone, Debug)]
pub struct RankedMatch {
    pub id: String,
    pub score: f64,
    pub metadata: Option<CourseMetadata>,
}

/// one stateless query round trip: embed the query, run a top-k similarity
/// search with metadata, drop matches under the score threshold
pub async fn run_search(
    config: &Config,
    query: &str,
    top_k: usize,
    min_score: f64,
) -> Result<Vec<RankedMatch>, CoursevecError> {
    let provider = providers::get_provider(
        &config.model,
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.ollama_host.clone(),
    )?;
    let request = GenericEmbeddingRequest {
        input: vec![query.to_string()],
        model: config.model.api_name(),
    };
    let vector = provider
        .generate_embedding(&request)
        .await?
        .embeddings
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("embedding service returned no vector for the query"))?;

    let pinecone = PineconeClient::new(
        config.pinecone_base_url.clone(),
        config.pinecone_api_key.clone(),
    );
    let index = pinecone.describe_index(&config.index_name).await?;
    let matches = pinecone.query(&index.host, &vector, top_k, true).await?;
    info!(
        "index returned {} matches for top_k={}",
        matches.len(),
        top_k
    );
    Ok(filter_and_rank(matches, min_score))
}

/// drop matches under the threshold and order the rest by descending score
pub fn filter_and_rank(matches: Vec<SearchMatch>, min_score: f64) -> Vec<RankedMatch> {
    let mut results: Vec<RankedMatch> = matches
        .into_iter()
        .filter(|m| m.score >= min_score)
        .map(|m| RankedMatch {
            id: m.id,
            score: m.score,
            metadata: m.metadata,
        })
        .collect();
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}

pub fn render_matches(matches: &[RankedMatch]) -> String {
    if matches.is_empty() {
        return "no matches above the score threshold\n".to_string();
    }
    let mut out = String::new();
    for (rank, m) in matches.iter().enumerate() {
        match &m.metadata {
            Some(meta) => {
                writeln!(
                    &mut out,
                    "{}. [{:.4}] {} ({})",
                    rank + 1,
                    m.score,
                    meta.course_name,
                    meta.technology
                )
                .expect("failed to write to output string");
                if !meta.description.is_empty() {
                    writeln!(&mut out, "   {}", meta.description)
                        .expect("failed to write to output string");
                }
            }
            None => {
                writeln!(&mut out, "{}. [{:.4}] {}", rank + 1, m.score, m.id)
                    .expect("failed to write to output string");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_match(id: &str, score: f64) -> SearchMatch {
        SearchMatch {
            id: id.to_string(),
            score,
            metadata: Some(CourseMetadata {
                course_name: format!("Course {id}"),
                technology: "python".to_string(),
                description: "Learn things.".to_string(),
            }),
        }
    }

    #[test]
    fn test_filter_drops_below_threshold() {
        let matches = vec![
            search_match("a", 0.9),
            search_match("b", 0.29),
            search_match("c", 0.3),
        ];
        let ranked = filter_and_rank(matches, 0.3);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|m| m.score >= 0.3));
    }

    #[test]
    fn test_rank_non_increasing() {
        let matches = vec![
            search_match("a", 0.4),
            search_match("b", 0.9),
            search_match("c", 0.7),
        ];
        let ranked = filter_and_rank(matches, 0.0);
        let scores: Vec<f64> = ranked.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.9, 0.7, 0.4]);
    }

    #[test]
    fn test_filter_keeps_exact_threshold() {
        let ranked = filter_and_rank(vec![search_match("a", 0.3)], 0.3);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_render_four_decimal_scores() {
        let ranked = filter_and_rank(vec![search_match("a", 0.81234567)], 0.0);
        let out = render_matches(&ranked);
        assert!(out.contains("[0.8123]"));
        assert!(out.starts_with("1. "));
        assert!(out.contains("Course a (python)"));
        assert!(out.contains("   Learn things."));
    }

    #[test]
    fn test_render_without_metadata() {
        let ranked = vec![RankedMatch {
            id: "orphan".to_string(),
            score: 0.5,
            metadata: None,
        }];
        let out = render_matches(&ranked);
        assert!(out.contains("[0.5000] orphan"));
    }

    #[test]
    fn test_render_empty() {
        let out = render_matches(&[]);
        assert!(out.contains("no matches"));
    }
}
