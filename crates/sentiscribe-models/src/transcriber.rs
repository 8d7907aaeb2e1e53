//! Client for an OpenAI-compatible Whisper transcription server.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::error::ModelError;
use crate::types::{AudioUpload, Transcript};

const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";

#[derive(Debug, Clone)]
pub struct WhisperClient {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl WhisperClient {
    /// Create a client that sends audio to `base_url` using the given model id.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{TRANSCRIPTIONS_PATH}", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    /// Transcribe an uploaded audio file.
    ///
    /// The audio is streamed from memory as a multipart `file` part; the
    /// server decides how to decode it from the filename and content type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Transcription`] if the request fails, the server
    /// returns a non-2xx status, or the body is not a transcript.
    pub async fn transcribe(&self, audio: AudioUpload) -> Result<Transcript, ModelError> {
        let size = audio.bytes.len();
        let mut part = Part::bytes(audio.bytes).file_name(audio.file_name.clone());
        if let Some(content_type) = audio.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|e| {
                ModelError::Transcription(format!("invalid content type '{content_type}': {e}"))
            })?;
        }

        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        tracing::debug!(file = %audio.file_name, bytes = size, model = %self.model, "sending audio for transcription");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ModelError::Transcription(format!("whisper request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Transcription(format!(
                "whisper returned status {status}: {}",
                body.trim()
            )));
        }

        let transcript: Transcript = response
            .json()
            .await
            .map_err(|e| ModelError::Transcription(format!("whisper response parse error: {e}")))?;

        tracing::debug!(
            chars = transcript.text.len(),
            language = transcript.language.as_deref().unwrap_or("unknown"),
            "transcription complete"
        );
        Ok(transcript)
    }
}
