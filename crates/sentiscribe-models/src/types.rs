use sentiscribe_core::{Rank, SentimentLabel};
use serde::Deserialize;

/// One `(label, score)` entry as returned by the classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Raw model label id, e.g. `LABEL_2`.
    pub label: String,
    pub score: f32,
}

/// Decoded speech plus whatever metadata the server reports.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Audio length in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

/// An uploaded audio file held in memory.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    /// MIME type reported by the uploader, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
    pub sentiment: SentimentLabel,
    /// Raw classifier confidence the rank was derived from.
    pub score: f32,
    pub score_rank: Rank,
}

#[derive(Debug, Clone)]
pub struct AudioAnalysis {
    pub transcript: Transcript,
    pub analysis: TextAnalysis,
}
