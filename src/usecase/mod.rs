//! UseCase 層
//!
//! プロトコルの各操作を 1 つずつユースケースとして実装します。
//! 各ユースケースは `RoomRegistry` trait にのみ依存します。

mod join_room;
mod leave_room;
mod list_rooms;
mod send_message;

pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use send_message::SendMessageUseCase;
