mod sentiment;
mod transcribe;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use sentiscribe_models::{ModelError, SentimentPipeline};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

pub(crate) const BANNER: &str =
    "Sentiscribe server running with Whisper transcription and sentiment analysis.";

/// Model ids reported by the health route.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub sentiment_model: String,
    pub whisper_model: String,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SentimentPipeline>,
    pub models: Arc<ModelInfo>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Error body returned by every route.
///
/// `error` holds the human-readable message; the web client reads that key.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
struct HealthData<'a> {
    status: &'static str,
    sentiment_backend: &'static str,
    #[serde(flatten)]
    models: &'a ModelInfo,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            request_id: request_id.into(),
        }
    }

    pub(super) fn bad_request(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "bad_request", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            "payload_too_large" => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_model_error(request_id: String, error: &ModelError) -> ApiError {
    tracing::error!(request_id = %request_id, error = %error, "model inference failed");
    let code = match error {
        ModelError::Label(_) => "unknown_label",
        _ => "model_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/v1/health", get(health))
        .route("/predict_sentiment", post(sentiment::predict_sentiment))
        .route(
            "/transcribe_and_analyze",
            post(transcribe::transcribe_and_analyze)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn home() -> &'static str {
    BANNER
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let (status, data) = match state.pipeline.classifier().health().await {
        Ok(()) => (
            StatusCode::OK,
            HealthData {
                status: "ok",
                sentiment_backend: "ok",
                models: &state.models,
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: sentiment backend unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthData {
                    status: "degraded",
                    sentiment_backend: "unavailable",
                    models: &state.models,
                },
            )
        }
    };

    (status, Json(ApiResponse { data, meta })).into_response()
}
