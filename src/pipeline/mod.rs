use crate::batch::send_in_batches;
use crate::blob::decompress::{decompress, DecompressError};
use crate::broker::traits::{BrokerConnector, BrokerError, BrokerProducer};
use crate::config::types::Settings;
use crate::flowlog::{flatten, RawDocument};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("decompression error: {0}")]
    Decompress(#[from] DecompressError),

    #[error("blob is not a parseable log document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
}

/// Per-blob orchestrator. Owns the long-lived broker producer: connected
/// lazily on the first blob that yields events, shared across invocations,
/// released once on shutdown. Safe to call from several invocation tasks at
/// a time; one blob's processing itself runs sequentially.
pub struct Pipeline {
    settings: Settings,
    connector: Box<dyn BrokerConnector>,
    producer: OnceCell<Arc<dyn BrokerProducer>>,
    closed: AtomicBool,
}

impl Pipeline {
    pub fn new(settings: Settings, connector: Box<dyn BrokerConnector>) -> Self {
        Self {
            settings,
            connector,
            producer: OnceCell::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one flow-log blob end to end and return the number of events
    /// enqueued to the broker. An empty or event-less blob is a valid run
    /// that sends nothing; an unparseable one is an error with no partial
    /// output.
    pub async fn process_blob(&self, name: &str, data: &[u8]) -> Result<usize, PipelineError> {
        info!(blob = %name, bytes = data.len(), "Processing flow-log blob");

        if data.is_empty() {
            warn!(blob = %name, "Blob is empty");
            return Ok(0);
        }

        let payload = decompress(name, data)?;
        if payload.iter().all(|b| b.is_ascii_whitespace()) {
            warn!(blob = %name, "Blob is empty after decompression");
            return Ok(0);
        }

        let doc: RawDocument = serde_json::from_slice(&payload)?;
        let flat = flatten(&doc);
        if !flat.issues.is_empty() {
            warn!(
                blob = %name,
                issues = flat.issues.len(),
                "Some log content was skipped during flattening"
            );
        }

        let mut messages = Vec::with_capacity(flat.records.len());
        for record in &flat.records {
            match record.to_message() {
                Ok(message) => messages.push(message),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize flow record, skipping");
                }
            }
        }
        info!(blob = %name, records = messages.len(), "Parsed flow records from blob");

        if messages.is_empty() {
            info!(blob = %name, "No events to send");
            return Ok(0);
        }

        let producer = self.producer().await?;
        let sent = send_in_batches(
            producer.as_ref(),
            &messages,
            self.settings.max_events_per_batch,
        )
        .await?;

        info!(
            blob = %name,
            sent,
            topic = %self.settings.topic,
            "Forwarded events to broker"
        );
        Ok(sent)
    }

    async fn producer(&self) -> Result<&Arc<dyn BrokerProducer>, BrokerError> {
        self.producer
            .get_or_try_init(|| async {
                info!(
                    endpoint = %self.settings.broker_endpoint,
                    topic = %self.settings.topic,
                    "Creating broker producer"
                );
                self.connector.connect(&self.settings).await
            })
            .await
    }

    /// Release the shared broker producer. Only the first call closes it;
    /// later calls are no-ops. Processing blobs after shutdown is not
    /// supported.
    pub async fn shutdown(&self) -> Result<(), BrokerError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(producer) = self.producer.get() {
            producer.close().await?;
            info!("Broker producer closed");
        }
        Ok(())
    }
}
