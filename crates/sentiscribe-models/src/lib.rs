//! Clients for the external speech and sentiment models.
//!
//! Sentiment comes from a TEI (Text Embeddings Inference) server hosting a
//! three-class sequence classifier; speech comes from an OpenAI-compatible
//! Whisper server. [`SentimentPipeline`] composes the two with the label table
//! and rank bucketing from `sentiscribe-core`.

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod transcriber;
pub mod types;

pub use classifier::TeiClassifier;
pub use error::ModelError;
pub use pipeline::SentimentPipeline;
pub use transcriber::WhisperClient;
pub use types::{AudioAnalysis, AudioUpload, Prediction, TextAnalysis, Transcript};
