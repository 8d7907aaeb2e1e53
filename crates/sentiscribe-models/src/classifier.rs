//! TEI (Text Embeddings Inference) client for sequence classification.

use std::time::Duration;

use serde::Serialize;

use crate::error::ModelError;
use crate::types::Prediction;

/// HTTP client for a TEI server hosting the sentiment classifier.
#[derive(Debug, Clone)]
pub struct TeiClassifier {
    client: reqwest::Client,
    predict_url: String,
    health_url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

impl TeiClassifier {
    /// Create a new `TeiClassifier` against `base_url` (no trailing `/predict`).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let base = base_url.trim_end_matches('/');

        Ok(Self {
            client,
            predict_url: format!("{base}/predict"),
            health_url: format!("{base}/health"),
        })
    }

    /// Classify `text` and return the single best prediction.
    ///
    /// TEI answers with every class and its score; the highest score wins.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Sentiment`] if the request fails, the server
    /// returns a non-2xx status, or the response is empty or unparseable.
    pub async fn classify(&self, text: &str) -> Result<Prediction, ModelError> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(&PredictRequest { inputs: text })
            .send()
            .await
            .map_err(|e| ModelError::Sentiment(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Sentiment(format!(
                "TEI returned status {status}: {}",
                body.trim()
            )));
        }

        let predictions: Vec<Prediction> = response
            .json()
            .await
            .map_err(|e| ModelError::Sentiment(format!("TEI response parse error: {e}")))?;

        let best = best_prediction(predictions)
            .ok_or_else(|| ModelError::Sentiment("TEI returned no predictions".to_string()))?;

        tracing::debug!(label = %best.label, score = best.score, "classified text");
        Ok(best)
    }

    /// Returns `Ok(())` when the TEI server answers its health probe.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] on network failure or
    /// [`ModelError::Sentiment`] on a non-2xx status.
    pub async fn health(&self) -> Result<(), ModelError> {
        let response = self.client.get(&self.health_url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ModelError::Sentiment(format!(
                "TEI health returned status {}",
                response.status()
            )))
        }
    }
}

fn best_prediction(predictions: Vec<Prediction>) -> Option<Prediction> {
    predictions
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(label: &str, score: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn best_prediction_picks_highest_score_regardless_of_order() {
        let best = best_prediction(vec![p("LABEL_0", 0.1), p("LABEL_2", 0.8), p("LABEL_1", 0.1)])
            .expect("some");
        assert_eq!(best.label, "LABEL_2");
    }

    #[test]
    fn best_prediction_empty_is_none() {
        assert!(best_prediction(Vec::new()).is_none());
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = TeiClassifier::new("http://tei:8080/", 5).expect("client");
        assert_eq!(client.predict_url, "http://tei:8080/predict");
        assert_eq!(client.health_url, "http://tei:8080/health");
    }
}
