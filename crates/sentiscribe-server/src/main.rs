mod api;
mod middleware;

use std::sync::Arc;

use sentiscribe_models::SentimentPipeline;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, ModelInfo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sentiscribe_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(config = ?config, "starting sentiscribe server");

    let pipeline = SentimentPipeline::from_config(&config)?;
    if let Err(e) = pipeline.classifier().health().await {
        tracing::warn!(error = %e, "sentiment backend not ready at startup");
    }

    let state = AppState {
        pipeline: Arc::new(pipeline),
        models: Arc::new(ModelInfo {
            sentiment_model: config.sentiment_model.clone(),
            whisper_model: config.whisper_model.clone(),
        }),
    };
    let app = build_app(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
