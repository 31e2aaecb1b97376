use crate::broker::log_sink::LogSinkConnector;
use crate::broker::traits::BrokerError;
use crate::config::{load_settings, settings_from_env, ConfigError};
use crate::pipeline::{Pipeline, PipelineError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read blob '{path}': {source}")]
    ReadBlob {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
}

/// Run the pipeline over a list of blob files, one invocation per file, the
/// way the hosting trigger would hand us blobs one at a time.
pub async fn run(config_path: Option<PathBuf>, inputs: Vec<PathBuf>) -> Result<(), RunError> {
    let settings = match &config_path {
        Some(path) => {
            info!(config_path = %path.display(), "Loading settings");
            load_settings(path)?
        }
        None => settings_from_env()?,
    };

    // The binary has no deployment-specific broker client; batches go to the
    // log sink. Library consumers plug in their own connector.
    let pipeline = Pipeline::new(settings, Box::new(LogSinkConnector::default()));

    let mut total = 0usize;
    for path in &inputs {
        match process_one(&pipeline, path).await {
            Ok(sent) => total += sent,
            Err(e) => {
                error!(blob = %path.display(), error = %e, "Failed to process blob");
                // Release the producer before surfacing the failure.
                let _ = pipeline.shutdown().await;
                return Err(e);
            }
        }
    }

    pipeline.shutdown().await?;
    info!(blobs = inputs.len(), total, "Ingest complete");
    Ok(())
}

async fn process_one(pipeline: &Pipeline, path: &Path) -> Result<usize, RunError> {
    let name = path.to_string_lossy();
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| RunError::ReadBlob {
            path: name.to_string(),
            source,
        })?;
    Ok(pipeline.process_blob(&name, &data).await?)
}
