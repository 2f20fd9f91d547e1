use tiktoken_rs::cl100k_base;
use uuid::Uuid;

use crate::errors::CoursevecError;
use crate::transformers::types::Inputs;
use crate::types::CourseRecord;

/// render one course row into the document that gets embedded.
/// deterministic: the same row always yields byte-identical text
pub fn format_course(record: &CourseRecord) -> String {
    format!(
        "the course name is {}, the slug is {}, the technology is {} and the course topic is {}",
        record.course_name, record.course_slug, record.course_technology, record.course_topic
    )
}

// entries are keyed by slug so re-running ingestion updates in place;
// rows without a slug get a random id and will duplicate on re-run
fn record_id(record: &CourseRecord) -> String {
    if record.course_slug.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        record.course_slug.clone()
    }
}

pub fn build_inputs(records: &[CourseRecord]) -> Result<Vec<Inputs>, CoursevecError> {
    let bpe = cl100k_base()?;
    Ok(records
        .iter()
        .map(|record| {
            let text = format_course(record);
            let token_estimate = bpe.encode_with_special_tokens(&text).len() as i32;
            Inputs {
                record_id: record_id(record),
                inputs: text,
                token_estimate,
            }
        })
        .collect())
}
