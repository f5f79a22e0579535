//! ドメイン層
//!
//! チャットの中核となるモデルを定義します：
//! - 値オブジェクト（`SessionId`, `ClientName`, `RoomName`）
//! - `Room` エンティティ（メンバー集合とブロードキャスト）
//! - プロトコルコマンドのパーサ（`ClientCommand`）
//! - データアクセスのインターフェース（`RoomRegistry` trait）

mod command;
mod identity;
mod registry;
mod room;

pub use command::ClientCommand;
pub use identity::{ClientName, RoomName, SessionId};
pub use registry::{RegistryError, RoomRegistry, RoomSummary};
pub use room::{Member, Outbox, Room};

#[cfg(test)]
pub use registry::MockRoomRegistry;
