//! Interactive TCP chat client implementation.

mod formatter;
mod runner;

pub use runner::{ClientError, run_client};
