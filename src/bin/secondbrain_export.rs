//! Exports the experience journal to a JSON file for retrieval pipelines.
//!
//! Usage:
//!
//! ```text
//! secondbrain-export [output-path]
//! ```
//!
//! The database location comes from `SECONDBRAIN_DB_PATH` (see
//! [`secondbrain::config`]). When `output-path` is omitted the export is
//! written to `experiences_export.json` in the working directory. Set
//! `RUST_LOG` to adjust log verbosity; the default level is `info`.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use secondbrain::config::{ConfigError, StorageConfig};
use secondbrain::experience::adapters::sqlite::SqliteExperienceRepository;
use secondbrain::rag::{RagError, RagService, export_path};
use secondbrain::storage::{StorageError, open_pool};
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
enum ExportError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Rag(#[from] RagError),
    #[error("failed to encode statistics: {0}")]
    Statistics(#[source] serde_json::Error),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let destination = parse_args(collect_args()?.into_iter())?;
    run_export(destination).map_err(Into::into)
}

fn collect_args() -> Result<Vec<String>, ExportError> {
    env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| ExportError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Utf8PathBuf, ExportError> {
    let _program = args.next();
    let requested = args.next();
    if let Some(extra) = args.next() {
        return Err(ExportError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok(export_path(requested.as_deref()))
}

fn run_export(destination: Utf8PathBuf) -> Result<(), ExportError> {
    let config = StorageConfig::from_env()?;
    let pool = open_pool(&config)?;
    let service = RagService::new(
        Arc::new(SqliteExperienceRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ExportError::RuntimeInit)?;
    runtime.block_on(async {
        let written = service.export_to_file(&destination).await?;
        let statistics = service.compute_statistics().await?;
        let summary = serde_json::to_string(&statistics).map_err(ExportError::Statistics)?;
        tracing::info!(path = %written, statistics = %summary, "export complete");
        Ok(())
    })
}
