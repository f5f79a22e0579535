//! TCP chat server surface.

mod connection;
mod server;
mod session;
mod signal;
pub mod state; // UseCase 束の組み立てにバイナリからアクセスするため public

pub use server::{Server, ServerError};
