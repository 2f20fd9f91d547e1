pub mod pinecone;
pub mod types;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use pinecone::PineconeClient;
pub use types::{IndexDescription, IndexEntry, SearchMatch};

/// similarity metric the index ranks by
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Metric::Cosine => write!(f, "cosine"),
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::DotProduct => write!(f, "dotproduct"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "euclidean" => Ok(Metric::Euclidean),
            "dotproduct" => Ok(Metric::DotProduct),
            _ => Err(format!("Invalid value: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_round_trip() {
        for raw in ["cosine", "euclidean", "dotproduct"] {
            let metric = raw.parse::<Metric>().unwrap();
            assert_eq!(metric.to_string(), raw);
        }
    }

    #[test]
    fn test_metric_invalid() {
        assert!("manhattan".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_wire_format() {
        assert_eq!(serde_json::to_string(&Metric::Cosine).unwrap(), "\"cosine\"");
        assert_eq!(
            serde_json::from_str::<Metric>("\"dotproduct\"").unwrap(),
            Metric::DotProduct
        );
    }
}
