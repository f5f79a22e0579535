//! Server state shared across all sessions.

use std::sync::Arc;

use crate::usecase::{JoinRoomUseCase, LeaveRoomUseCase, ListRoomsUseCase, SendMessageUseCase};

/// Shared application state
///
/// Constructed once at server startup and handed to every session task.
/// There is no process-wide singleton: everything a session touches goes
/// through these use cases.
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
}
