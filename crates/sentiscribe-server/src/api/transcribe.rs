use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Extension, Json,
};
use sentiscribe_core::{Rank, SentimentLabel};
use sentiscribe_models::AudioUpload;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_model_error, ApiError, AppState};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub(super) struct TranscribeAndAnalyzeResponse {
    pub transcription: String,
    pub sentiment: SentimentLabel,
    pub score_rank: Rank,
}

pub(super) async fn transcribe_and_analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeAndAnalyzeResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected non-multipart upload");
        ApiError::bad_request(req_id.0.clone(), "No file part")
    })?;

    let upload = read_file_part(&mut multipart, &req_id.0).await?;
    tracing::info!(
        file = %upload.file_name,
        bytes = upload.bytes.len(),
        "received audio upload"
    );

    let result = state
        .pipeline
        .transcribe_and_analyze(upload)
        .await
        .map_err(|e| map_model_error(req_id.0.clone(), &e))?;

    Ok(Json(TranscribeAndAnalyzeResponse {
        transcription: result.transcript.text,
        sentiment: result.analysis.sentiment,
        score_rank: result.analysis.score_rank,
    }))
}

/// Pull the `file` part out of the form, skipping any other fields.
async fn read_file_part(
    multipart: &mut Multipart,
    request_id: &str,
) -> Result<AudioUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(request_id, &e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| ApiError::bad_request(request_id, "No selected file"))?;
        let content_type = field.content_type().map(ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| map_multipart_error(request_id, &e))?;

        return Ok(AudioUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::bad_request(request_id, "No file part"))
}

fn map_multipart_error(request_id: &str, error: &MultipartError) -> ApiError {
    tracing::warn!(error = %error, "failed to read multipart upload");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(request_id, "payload_too_large", "Uploaded file is too large")
    } else {
        ApiError::bad_request(request_id, error.body_text())
    }
}
