//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSummary};

/// ルーム一覧取得のユースケース
///
/// `LISTROOMS` コマンドに対応する、ルーム名とメンバー数の
/// ある時点のスナップショットを返します。
pub struct ListRoomsUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ListRoomsUseCase {
    /// 新しい ListRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム一覧を取得（ルーム名順）
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.list().await
    }
}
