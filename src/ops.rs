use std::path::Path;

use log::info;

use crate::config::Config;
use crate::errors::CoursevecError;
use crate::formatter;
use crate::index::types::IndexEntry;
use crate::index::PineconeClient;
use crate::loader;
use crate::transformers::http_handler;
use crate::transformers::providers;

#[derive(Debug, Default)]
pub struct IngestSummary {
    pub records: usize,
    pub batches: usize,
    pub upserted: u64,
    pub index_host: String,
}

/// one-time ingestion: load -> format -> embed -> ensure index -> upsert.
/// strictly linear; a failing step aborts the run and earlier batch writes
/// are kept
pub async fn run_ingest(config: &Config, csv_path: &Path) -> Result<IngestSummary, CoursevecError> {
    let records = loader::read_courses(csv_path)?;
    if records.is_empty() {
        info!("no course records found in {}", csv_path.display());
        return Ok(IngestSummary::default());
    }
    info!("loaded {} course records", records.len());

    let inputs = formatter::build_inputs(&records)?;
    let provider = providers::get_provider(
        &config.model,
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.ollama_host.clone(),
    )?;
    let request = providers::prepare_generic_embedding_request(&config.model, &inputs);
    let embeddings = provider.generate_embedding(&request).await?.embeddings;
    if embeddings.len() != inputs.len() {
        return Err(anyhow::anyhow!(
            "embedding service returned {} vectors for {} inputs",
            embeddings.len(),
            inputs.len()
        )
        .into());
    }
    let dimension = embeddings[0].len() as u32;
    info!(
        "generated {} embeddings of dimension {}",
        embeddings.len(),
        dimension
    );

    let pinecone = PineconeClient::new(
        config.pinecone_base_url.clone(),
        config.pinecone_api_key.clone(),
    );
    let index = pinecone
        .ensure_index(
            &config.index_name,
            dimension,
            config.metric,
            &config.cloud,
            &config.region,
        )
        .await?;

    let paired = http_handler::merge_input_output(inputs, embeddings);
    let entries: Vec<IndexEntry> = records
        .iter()
        .zip(paired)
        .map(|(record, pair)| IndexEntry {
            id: pair.primary_key,
            values: pair.embeddings,
            metadata: record.metadata(),
        })
        .collect();

    let batches = split_batches(entries, config.upsert_batch_size);
    let num_batches = batches.len();
    let mut upserted: u64 = 0;
    for (i, batch) in batches.iter().enumerate() {
        let count = pinecone.upsert(&index.host, batch).await?;
        upserted += count;
        info!(
            "upserted batch {}/{} ({} entries)",
            i + 1,
            num_batches,
            batch.len()
        );
    }

    Ok(IngestSummary {
        records: records.len(),
        batches: num_batches,
        upserted,
        index_host: index.host,
    })
}

// partition into fixed-size chunks, preserving order
pub fn split_batches<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let batch_size = batch_size.max(1);
    let mut batches: Vec<Vec<T>> = Vec::with_capacity(items.len().div_ceil(batch_size));
    let mut current: Vec<T> = Vec::new();
    for item in items {
        if current.len() == batch_size {
            batches.push(current);
            current = Vec::new();
        }
        current.push(item);
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CourseMetadata;
    use rand::Rng;

    #[test]
    fn test_split_batches_index_entries() {
        let mut rng = rand::thread_rng();
        let entries: Vec<IndexEntry> = (0..7)
            .map(|i| IndexEntry {
                id: format!("course-{i}"),
                values: (0..8).map(|_| rng.gen_range(-1.0..1.0)).collect(),
                metadata: CourseMetadata {
                    course_name: format!("Course {i}"),
                    technology: "python".to_string(),
                    description: String::new(),
                },
            })
            .collect();
        let batches = split_batches(entries, 3);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 7);
        assert_eq!(batches[0][0].id, "course-0");
        assert_eq!(batches[2][0].id, "course-6");
    }

    #[test]
    fn test_split_batches_exact_chunk_count() {
        let items: Vec<usize> = (0..250).collect();
        let batches = split_batches(items, 100);
        // ceil(250 / 100)
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 100);
        assert_eq!(batches[1].len(), 100);
        assert_eq!(batches[2].len(), 50);
    }

    #[test]
    fn test_split_batches_covers_all_once_in_order() {
        let items: Vec<usize> = (0..37).collect();
        let batches = split_batches(items, 10);
        let flattened: Vec<usize> = batches.into_iter().flatten().collect();
        assert_eq!(flattened, (0..37).collect::<Vec<usize>>());
    }

    #[test]
    fn test_split_batches_smaller_than_batch() {
        let batches = split_batches(vec![1, 2, 3], 100);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], vec![1, 2, 3]);
    }

    #[test]
    fn test_split_batches_empty() {
        let batches: Vec<Vec<usize>> = split_batches(Vec::new(), 100);
        assert!(batches.is_empty());
    }
}
