//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリのルーム表として使用します。
//!
//! ## ロック構成
//!
//! - マップ全体を守る `Mutex` 1 つ（ルームの生成・削除・ハンドル取得）
//! - ルームごとの `Arc<Mutex<Room>>`（メンバー変更とブロードキャスト）
//!
//! ロック順序は常に「マップ → ルーム」。`join` / `leave` はマップロックを
//! 保持したままルームを変更することで、「なければ作成」と「空なら削除」が
//! 並行する join と競合しないことを保証します。チャットのブロードキャストは
//! ハンドルを取り出した後マップロックを手放すため、別ルーム同士の
//! トラフィックは競合しません。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Member, RegistryError, Room, RoomName, RoomRegistry, RoomSummary, SessionId};

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    /// ルーム名 → ルームハンドルのマップ
    rooms: Mutex<HashMap<RoomName, Arc<Mutex<Room>>>>,
}

impl InMemoryRoomRegistry {
    /// 空の Registry を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room_name: &RoomName, session_id: SessionId, member: Member) {
        let mut rooms = self.rooms.lock().await;
        let created = !rooms.contains_key(room_name);
        let handle = rooms
            .entry(room_name.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Room::new(room_name.clone()))))
            .clone();
        if created {
            tracing::info!("Room '{}' created", room_name);
        }

        // マップロックを保持したまま追加することで、並行する leave の
        // 「空なら削除」との競合（削除済みルームへの参加）を防ぐ
        let mut room = handle.lock().await;
        room.add_member(session_id, member);
    }

    async fn leave(&self, room_name: &RoomName, session_id: SessionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(handle) = rooms.get(room_name).cloned() else {
            tracing::warn!(
                "Session {} tried to leave unknown room '{}'",
                session_id,
                room_name
            );
            return false;
        };

        let mut room = handle.lock().await;
        let removed = room.remove_member(session_id).is_some();
        if room.is_empty() {
            rooms.remove(room_name);
            tracing::info!("Room '{}' is empty and has been removed", room_name);
        }
        removed
    }

    async fn broadcast(
        &self,
        room_name: &RoomName,
        line: &str,
        exclude: SessionId,
    ) -> Result<(), RegistryError> {
        // ハンドルの取得後はマップロックを手放し、ルームロックのみで配送する
        let handle = self.rooms.lock().await.get(room_name).cloned();
        match handle {
            Some(handle) => {
                let room = handle.lock().await;
                room.broadcast(line, exclude);
                Ok(())
            }
            None => Err(RegistryError::RoomNotFound(room_name.to_string())),
        }
    }

    async fn list(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.lock().await;
        let mut summaries = Vec::with_capacity(rooms.len());
        for (name, handle) in rooms.iter() {
            let room = handle.lock().await;
            summaries.push(RoomSummary {
                name: name.clone(),
                member_count: room.member_count(),
            });
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}
