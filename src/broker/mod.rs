pub mod log_sink;
pub mod traits;

pub use traits::{BrokerConnector, BrokerError, BrokerProducer, MessageBatch};
