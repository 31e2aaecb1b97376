pub mod document;
pub mod flatten;
pub mod record;
pub mod timestamp;
pub mod tuple;

pub use document::RawDocument;
pub use flatten::{flatten, FlattenOutput, ParseIssue};
pub use record::FlowRecord;
