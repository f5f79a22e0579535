//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - チャット行の整形（`<name>: <text>`）とブロードキャスト依頼
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：送信者以外にのみメッセージが届く
//! - 配送形式がプロトコル仕様どおりであることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム内でのメッセージ送信
//! - 異常系：ルームが存在しない（不変条件違反時のみ発生）

use std::sync::Arc;

use crate::domain::{ClientName, RegistryError, RoomName, RoomRegistry, SessionId};

/// チャットメッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信者のセッション ID
    /// * `name` - 送信者の表示名
    /// * `current_room` - 送信者が所属しているルーム名
    /// * `text` - チャット本文
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 送信成功（個別メンバーへの配送失敗は含まない）
    /// * `Err(RegistryError)` - ルームが存在しない
    pub async fn execute(
        &self,
        session_id: SessionId,
        name: &ClientName,
        current_room: &RoomName,
        text: &str,
    ) -> Result<(), RegistryError> {
        // 1. プロトコル形式 `<name>: <text>` に整形する
        let line = format!("{}: {}", name, text);

        // 2. 送信者以外の全メンバーへブロードキャストする
        self.registry
            .broadcast(current_room, &line, session_id)
            .await
    }
}
