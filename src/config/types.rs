use serde::{Deserialize, Serialize};

/// Default ceiling on messages per broker batch.
pub const DEFAULT_MAX_EVENTS_PER_BATCH: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Broker namespace address, e.g. "my-namespace.servicebus.example.net".
    pub broker_endpoint: String,

    /// Target topic for flattened flow records.
    pub topic: String,

    /// Soft ceiling on messages per batch, layered atop the broker's own
    /// byte limit.
    #[serde(default = "default_max_events_per_batch")]
    pub max_events_per_batch: usize,
}

fn default_max_events_per_batch() -> usize {
    DEFAULT_MAX_EVENTS_PER_BATCH
}
