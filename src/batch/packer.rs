use crate::broker::traits::{BrokerError, BrokerProducer, MessageBatch};
use tracing::{debug, error};

/// Pack serialized messages into broker batches and flush them in order.
///
/// Two limits are in play: the broker's own byte/count ceiling, discovered
/// reactively when `try_add` refuses a message, and `max_events_per_batch`,
/// enforced proactively after every accepted add. A message refused by an
/// empty batch can never fit and is discarded with an error log; everything
/// else is guaranteed a slot. Empty batches are never sent. Returns the
/// total number of messages enqueued across all sends.
///
/// A transport failure aborts the run immediately; batches already sent stay
/// sent.
pub async fn send_in_batches(
    producer: &dyn BrokerProducer,
    messages: &[String],
    max_events_per_batch: usize,
) -> Result<usize, BrokerError> {
    if messages.is_empty() {
        debug!("No events to send");
        return Ok(0);
    }

    let mut sent = 0usize;
    let mut batch = producer.new_batch();

    for message in messages {
        if !batch.try_add(message.as_bytes()) {
            // Batch is at the broker's limit. Flush and retry on a fresh one.
            if !batch.is_empty() {
                let full = std::mem::replace(&mut batch, producer.new_batch());
                sent += flush(producer, full).await?;
            }
            if !batch.try_add(message.as_bytes()) {
                error!(
                    size = message.len(),
                    "Event too large to fit in any batch, dropping"
                );
                continue;
            }
        }

        if batch.len() >= max_events_per_batch {
            let full = std::mem::replace(&mut batch, producer.new_batch());
            sent += flush(producer, full).await?;
        }
    }

    if !batch.is_empty() {
        sent += flush(producer, batch).await?;
    }

    Ok(sent)
}

async fn flush(
    producer: &dyn BrokerProducer,
    batch: Box<dyn MessageBatch>,
) -> Result<usize, BrokerError> {
    let count = batch.len();
    producer.send(batch).await?;
    debug!(events = count, "Sent batch");
    Ok(count)
}
