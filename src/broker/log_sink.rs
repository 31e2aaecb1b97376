use crate::broker::traits::{BrokerConnector, BrokerError, BrokerProducer, MessageBatch};
use crate::config::types::Settings;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Default per-batch byte ceiling for the log sink.
pub const DEFAULT_MAX_BATCH_BYTES: usize = 1_048_576;

/// A producer with no transport: batches are size-checked like a real
/// broker's, then logged and discarded. Lets the binary exercise the whole
/// pipeline without a deployment-specific broker client.
pub struct LogSink {
    topic: String,
    max_batch_bytes: usize,
}

impl LogSink {
    pub fn new(topic: String, max_batch_bytes: usize) -> Self {
        Self {
            topic,
            max_batch_bytes,
        }
    }
}

struct LogSinkBatch {
    max_bytes: usize,
    bytes: usize,
    count: usize,
}

impl MessageBatch for LogSinkBatch {
    fn try_add(&mut self, payload: &[u8]) -> bool {
        if self.bytes + payload.len() > self.max_bytes {
            return false;
        }
        self.bytes += payload.len();
        self.count += 1;
        true
    }

    fn len(&self) -> usize {
        self.count
    }
}

#[async_trait]
impl BrokerProducer for LogSink {
    fn new_batch(&self) -> Box<dyn MessageBatch> {
        Box::new(LogSinkBatch {
            max_bytes: self.max_batch_bytes,
            bytes: 0,
            count: 0,
        })
    }

    async fn send(&self, batch: Box<dyn MessageBatch>) -> Result<(), BrokerError> {
        info!(
            topic = %self.topic,
            events = batch.len(),
            "Batch accepted by log sink (not transmitted)"
        );
        Ok(())
    }

    async fn close(&self) -> Result<(), BrokerError> {
        info!(topic = %self.topic, "Log sink closed");
        Ok(())
    }
}

/// Connector for the log sink. Always succeeds; there is nothing to
/// authenticate against.
#[derive(Default)]
pub struct LogSinkConnector {
    pub max_batch_bytes: Option<usize>,
}

#[async_trait]
impl BrokerConnector for LogSinkConnector {
    async fn connect(&self, settings: &Settings) -> Result<Arc<dyn BrokerProducer>, BrokerError> {
        let max_bytes = self.max_batch_bytes.unwrap_or(DEFAULT_MAX_BATCH_BYTES);
        Ok(Arc::new(LogSink::new(settings.topic.clone(), max_bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_enforces_byte_ceiling() {
        let sink = LogSink::new("t".to_string(), 10);
        let mut batch = sink.new_batch();

        assert!(batch.try_add(b"1234"));
        assert!(batch.try_add(b"123456"));
        assert_eq!(batch.len(), 2);

        // Ceiling reached exactly; one more byte is rejected.
        assert!(!batch.try_add(b"x"));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_oversized_payload_rejected_by_empty_batch() {
        let sink = LogSink::new("t".to_string(), 4);
        let mut batch = sink.new_batch();
        assert!(!batch.try_add(b"too big"));
        assert!(batch.is_empty());
    }
}
