use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sentiscribe_models::{AudioUpload, SentimentPipeline};
use tracing_subscriber::{filter::ParseError, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "sentiscribe-cli")]
#[command(about = "Run sentiment analysis against the configured model servers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a piece of text
    Text {
        /// Text to analyze
        text: String,
    },
    /// Transcribe an audio file and classify the transcript
    Audio {
        /// Path to the audio file
        path: PathBuf,

        /// Override the MIME type sent with the upload
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = sentiscribe_core::load_app_config()?;

    let env_filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(command = ?cli.command, "running command");

    let pipeline = SentimentPipeline::from_config(&config)?;

    let output = match cli.command {
        Commands::Text { text } => {
            anyhow::ensure!(!text.is_empty(), "text must not be empty");
            let analysis = pipeline.analyze_text(&text).await?;
            serde_json::json!({
                "sentiment": analysis.sentiment,
                "score": analysis.score,
                "score_rank": analysis.score_rank,
            })
        }
        Commands::Audio { path, content_type } => {
            let upload = load_upload(&path, content_type)?;
            let result = pipeline.transcribe_and_analyze(upload).await?;
            serde_json::json!({
                "transcription": result.transcript.text,
                "language": result.transcript.language,
                "duration": result.transcript.duration,
                "sentiment": result.analysis.sentiment,
                "score": result.analysis.score,
                "score_rank": result.analysis.score_rank,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// `RUST_LOG` wins over the configured level, same as the server.
fn log_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(rust_log.filter(|v| !v.trim().is_empty()).unwrap_or(level))
}

fn load_upload(path: &Path, content_type: Option<String>) -> anyhow::Result<AudioUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(ToOwned::to_owned)
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let content_type = content_type.or_else(|| guess_content_type(path).map(ToOwned::to_owned));

    Ok(AudioUpload {
        file_name,
        content_type,
        bytes,
    })
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "ogg" | "oga" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_content_type_known_extensions() {
        assert_eq!(guess_content_type(Path::new("a.wav")), Some("audio/wav"));
        assert_eq!(guess_content_type(Path::new("b.MP3")), Some("audio/mpeg"));
        assert_eq!(guess_content_type(Path::new("dir/c.flac")), Some("audio/flac"));
    }

    #[test]
    fn guess_content_type_unknown_or_missing() {
        assert_eq!(guess_content_type(Path::new("notes.txt")), None);
        assert_eq!(guess_content_type(Path::new("noext")), None);
    }

    #[test]
    fn log_filter_uses_configured_level() {
        let filter = log_filter(None, "debug").expect("filter");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn log_filter_prefers_rust_log() {
        let filter = log_filter(Some("warn"), "debug").expect("filter");
        assert_eq!(filter.to_string(), "warn");

        let filter = log_filter(Some(" "), "trace").expect("filter");
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn load_upload_reports_missing_file() {
        let err = load_upload(Path::new("/definitely/not/here.wav"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read"), "{err}");
    }

    #[test]
    fn cli_parses_audio_subcommand() {
        let cli = Cli::try_parse_from([
            "sentiscribe-cli",
            "audio",
            "clip.ogg",
            "--content-type",
            "audio/ogg",
        ])
        .expect("parse");
        match cli.command {
            Commands::Audio { path, content_type } => {
                assert_eq!(path, PathBuf::from("clip.ogg"));
                assert_eq!(content_type.as_deref(), Some("audio/ogg"));
            }
            Commands::Text { .. } => panic!("expected audio subcommand"),
        }
    }
}
