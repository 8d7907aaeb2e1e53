use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use sentiscribe_core::{Rank, SentimentLabel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{map_model_error, ApiError, AppState};

/// Any JSON type is accepted for `text` so a wrong type gets the same 400 as a missing one.
#[derive(Debug, Deserialize)]
pub(super) struct PredictSentimentRequest {
    pub text: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictSentimentResponse {
    pub sentiment: SentimentLabel,
    pub score_rank: Rank,
}

pub(super) async fn predict_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PredictSentimentRequest>, JsonRejection>,
) -> Result<Json<PredictSentimentResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected predict_sentiment body");
        ApiError::bad_request(req_id.0.clone(), rejection.body_text())
    })?;

    let text = match request.text {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => {
            return Err(ApiError::bad_request(
                req_id.0,
                "Text field is required",
            ))
        }
    };

    let analysis = state
        .pipeline
        .analyze_text(&text)
        .await
        .map_err(|e| map_model_error(req_id.0.clone(), &e))?;

    Ok(Json(PredictSentimentResponse {
        sentiment: analysis.sentiment,
        score_rank: analysis.score_rank,
    }))
}
