use crate::config::types::Settings;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("failed to connect to broker: {0}")]
    Connect(String),

    #[error("transport failure while sending batch: {0}")]
    Transport(String),
}

/// One in-construction batch of serialized messages.
pub trait MessageBatch: Send {
    /// Try to add one message payload. Returns false when the batch cannot
    /// take it without exceeding the broker-imposed byte/count limit.
    fn try_add(&mut self, payload: &[u8]) -> bool;

    /// Number of messages accepted so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The broker capability the pipeline needs: construct batches, send them,
/// release the connection. The wire protocol behind it is not this crate's
/// concern.
#[async_trait]
pub trait BrokerProducer: Send + Sync {
    fn new_batch(&self) -> Box<dyn MessageBatch>;

    /// Transmit one accumulated batch. Blocks on network I/O; a transport
    /// failure is fatal for the caller's run.
    async fn send(&self, batch: Box<dyn MessageBatch>) -> Result<(), BrokerError>;

    async fn close(&self) -> Result<(), BrokerError>;
}

/// Builds an authenticated producer for the configured endpoint and topic.
/// Credentials must be ready before the first send; how they are obtained is
/// the connector's business.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    async fn connect(&self, settings: &Settings) -> Result<Arc<dyn BrokerProducer>, BrokerError>;
}
