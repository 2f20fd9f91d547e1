use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Inputs {
    pub record_id: String,   // identifier the entry is upserted under
    pub inputs: String,      // rendered course document
    pub token_estimate: i32, // estimated token count
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PairedEmbeddings {
    pub primary_key: String,
    pub embeddings: Vec<f64>,
}
