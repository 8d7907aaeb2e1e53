//! Composition of the model clients with label normalization and ranking.

use sentiscribe_core::{normalize_label, score_to_rank, AppConfig};

use crate::classifier::TeiClassifier;
use crate::error::ModelError;
use crate::transcriber::WhisperClient;
use crate::types::{AudioAnalysis, AudioUpload, Prediction, TextAnalysis};

/// Both model clients, built once at startup and shared across requests.
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    classifier: TeiClassifier,
    transcriber: WhisperClient,
}

impl SentimentPipeline {
    #[must_use]
    pub fn new(classifier: TeiClassifier, transcriber: WhisperClient) -> Self {
        Self {
            classifier,
            transcriber,
        }
    }

    /// Build both clients from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if either HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ModelError> {
        let classifier = TeiClassifier::new(&config.sentiment_url, config.model_timeout_secs)?;
        let transcriber = WhisperClient::new(
            &config.whisper_url,
            &config.whisper_model,
            config.model_timeout_secs,
        )?;
        Ok(Self::new(classifier, transcriber))
    }

    #[must_use]
    pub fn classifier(&self) -> &TeiClassifier {
        &self.classifier
    }

    /// Classify `text`, normalize the label and bucket the score.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Sentiment`] if the classifier fails and
    /// [`ModelError::Label`] if it answers with a label outside the known table.
    pub async fn analyze_text(&self, text: &str) -> Result<TextAnalysis, ModelError> {
        let prediction = self.classifier.classify(text).await?;
        let analysis = rank_prediction(&prediction)?;
        tracing::info!(
            sentiment = %analysis.sentiment,
            score_rank = %analysis.score_rank,
            "text analyzed"
        );
        Ok(analysis)
    }

    /// Transcribe `audio`, then run the transcript through [`Self::analyze_text`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Transcription`] if speech recognition fails, plus
    /// every error [`Self::analyze_text`] can return.
    pub async fn transcribe_and_analyze(
        &self,
        audio: AudioUpload,
    ) -> Result<AudioAnalysis, ModelError> {
        let mut transcript = self.transcriber.transcribe(audio).await?;
        let analysis = self
            .analyze_text(classification_input(&transcript.text))
            .await?;
        transcript.text = transcript.text.trim().to_string();
        Ok(AudioAnalysis {
            transcript,
            analysis,
        })
    }
}

/// Text sent to the classifier for a transcript.
///
/// Surrounding whitespace is dropped, except when nothing else is left: TEI
/// rejects empty `inputs`, so a silent recording is classified as-is.
fn classification_input(transcript: &str) -> &str {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        transcript
    } else {
        trimmed
    }
}

/// Turn a raw prediction into a ranked analysis.
///
/// # Errors
///
/// Returns [`ModelError::Label`] when the label id is not in the table.
pub fn rank_prediction(prediction: &Prediction) -> Result<TextAnalysis, ModelError> {
    let sentiment = normalize_label(&prediction.label)?;
    Ok(TextAnalysis {
        sentiment,
        score: prediction.score,
        score_rank: score_to_rank(sentiment, prediction.score),
    })
}

#[cfg(test)]
mod tests {
    use sentiscribe_core::{CoreError, Rank, SentimentLabel};

    use super::*;

    #[test]
    fn rank_prediction_composes_label_and_rank() {
        let analysis = rank_prediction(&Prediction {
            label: "LABEL_0".to_string(),
            score: 0.92,
        })
        .expect("known label");
        assert_eq!(analysis.sentiment, SentimentLabel::Negative);
        assert_eq!(analysis.score_rank, Rank::Low);
        assert!((analysis.score - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn classification_input_trims_speech() {
        assert_eq!(classification_input("  great sound \n"), "great sound");
    }

    #[test]
    fn classification_input_keeps_blank_transcript() {
        assert_eq!(classification_input(" "), " ");
        assert_eq!(classification_input(""), "");
    }

    #[test]
    fn rank_prediction_rejects_unknown_label() {
        let err = rank_prediction(&Prediction {
            label: "POSITIVE".to_string(),
            score: 0.99,
        })
        .unwrap_err();
        assert!(
            matches!(err, ModelError::Label(CoreError::UnknownLabel(ref l)) if l == "POSITIVE"),
            "unexpected error: {err:?}"
        );
    }
}
