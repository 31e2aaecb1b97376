pub mod packer;

pub use packer::send_in_batches;
