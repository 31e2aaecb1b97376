pub mod decompress;

pub use decompress::{decompress, DecompressError};
