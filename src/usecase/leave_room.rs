//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - ルーム退出処理（退出通知、空ルームの削除）
//!
//! ### なぜこのテストが必要か
//! - 明示的な LEAVE と切断時の後始末は同じ経路を通る（唯一の復旧経路）
//! - 空になったルームが Registry から即座に消えることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残るルームからの退出
//! - エッジケース：最後のメンバーの退出（ルーム削除）

use std::sync::Arc;

use crate::domain::{RoomName, RoomRegistry, SessionId};

/// ルーム退出のユースケース
///
/// 明示的な `LEAVE` と、切断・I/O エラー時のセッション後始末の
/// 両方から呼ばれます。
pub struct LeaveRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム退出を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 退出するセッションの ID
    /// * `current_room` - 退出するルーム名
    ///
    /// # Returns
    ///
    /// メンバーが実際に削除された場合 `true`
    pub async fn execute(&self, session_id: SessionId, current_room: &RoomName) -> bool {
        let removed = self.registry.leave(current_room, session_id).await;
        if !removed {
            // 不変条件が守られていればここには来ない
            tracing::warn!(
                "Session {} was not a member of room '{}'",
                session_id,
                current_room
            );
        }
        removed
    }
}
