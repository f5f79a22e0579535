//! RoomRegistry の実装
//!
//! - `inmemory`: プロセス内の HashMap を使った実装
//! - 将来的に: `redis` など

pub mod inmemory;

pub use inmemory::InMemoryRoomRegistry;
