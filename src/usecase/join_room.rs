//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加処理（暗黙の退出、遅延生成、参加通知）
//!
//! ### なぜこのテストが必要か
//! - 中心的な不変条件の検証：セッションは常に高々 1 つのルームに所属する
//! - 既にルームにいる状態での JOIN が先に退出として処理されることを保証
//! - 退出により空になった元のルームが削除されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：未所属からの参加、別ルームへの移動
//! - エッジケース：所属中のルームへの再参加

use std::sync::Arc;

use crate::domain::{ClientName, Member, Outbox, RoomName, RoomRegistry, SessionId};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（ルーム管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// 既にルームに所属している場合は先に退出してから参加します。
    /// セッションが高々 1 つのルームにしか所属しないことは、この
    /// 退出→参加の順序によって保たれます。
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加するセッションの ID
    /// * `name` - セッションの表示名
    /// * `outbox` - セッションへのメッセージ送信用チャンネル
    /// * `current_room` - 現在所属しているルーム（未所属なら None）
    /// * `target` - 参加先のルーム名
    ///
    /// # Returns
    ///
    /// 新しい所属ルーム名（呼び出し側のセッション状態に反映する）
    pub async fn execute(
        &self,
        session_id: SessionId,
        name: &ClientName,
        outbox: &Outbox,
        current_room: Option<&RoomName>,
        target: RoomName,
    ) -> RoomName {
        // 1. 所属中なら先に退出する（退出通知・空ルーム削除を含む）
        if let Some(current) = current_room {
            self.registry.leave(current, session_id).await;
        }

        // 2. 参加先ルームへ参加する（遅延生成・参加通知を含む）
        let member = Member::new(name.clone(), outbox.clone());
        self.registry.join(&target, session_id, member).await;

        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomSummary;
    use crate::infrastructure::InMemoryRoomRegistry;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn new_session(name: &str) -> (SessionId, ClientName, Outbox, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SessionId::new(), ClientName::new(name), tx, rx)
    }

    #[tokio::test]
    async fn test_join_from_idle() {
        // テスト項目: 未所属のセッションがルームに参加できる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (id, name, outbox, _rx) = new_session("alice");

        // when (操作):
        let joined = usecase
            .execute(id, &name, &outbox, None, RoomName::new("lobby"))
            .await;

        // then (期待する結果):
        assert_eq!(joined, RoomName::new("lobby"));
        assert_eq!(
            registry.list().await,
            vec![RoomSummary {
                name: RoomName::new("lobby"),
                member_count: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_join_moves_between_rooms() {
        // テスト項目: 所属中の JOIN が元のルームからの退出を伴う
        // given (前提条件): alice が lobby に所属
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (id, name, outbox, _rx) = new_session("alice");
        let lobby = usecase
            .execute(id, &name, &outbox, None, RoomName::new("lobby"))
            .await;

        // when (操作): games へ移動する
        let joined = usecase
            .execute(id, &name, &outbox, Some(&lobby), RoomName::new("games"))
            .await;

        // then (期待する結果): 空になった lobby は消え、games のみ残る
        assert_eq!(joined, RoomName::new("games"));
        assert_eq!(
            registry.list().await,
            vec![RoomSummary {
                name: RoomName::new("games"),
                member_count: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_move_notifies_members_of_both_rooms() {
        // テスト項目: ルーム移動で元のルームに退出通知、移動先に参加通知が届く
        // given (前提条件): bob が lobby、carol が games に所属
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (bob_id, bob_name, bob_outbox, mut bob_rx) = new_session("bob");
        let (carol_id, carol_name, carol_outbox, mut carol_rx) = new_session("carol");
        usecase
            .execute(bob_id, &bob_name, &bob_outbox, None, RoomName::new("lobby"))
            .await;
        usecase
            .execute(carol_id, &carol_name, &carol_outbox, None, RoomName::new("games"))
            .await;

        // alice が lobby に参加
        let (alice_id, alice_name, alice_outbox, _alice_rx) = new_session("alice");
        let lobby = usecase
            .execute(alice_id, &alice_name, &alice_outbox, None, RoomName::new("lobby"))
            .await;
        assert_eq!(bob_rx.try_recv().unwrap(), "User alice has joined the chat.");

        // when (操作): alice が games へ移動する
        usecase
            .execute(alice_id, &alice_name, &alice_outbox, Some(&lobby), RoomName::new("games"))
            .await;

        // then (期待する結果):
        assert_eq!(bob_rx.try_recv().unwrap(), "User alice has left the chat.");
        assert_eq!(
            carol_rx.try_recv().unwrap(),
            "User alice has joined the chat."
        );
    }

    #[tokio::test]
    async fn test_rejoin_same_room() {
        // テスト項目: 所属中のルームへの再 JOIN が退出→参加として処理される
        // given (前提条件): alice と bob が lobby に所属
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (alice_id, alice_name, alice_outbox, _alice_rx) = new_session("alice");
        let (bob_id, bob_name, bob_outbox, mut bob_rx) = new_session("bob");
        let lobby = usecase
            .execute(alice_id, &alice_name, &alice_outbox, None, RoomName::new("lobby"))
            .await;
        usecase
            .execute(bob_id, &bob_name, &bob_outbox, None, RoomName::new("lobby"))
            .await;
        let _ = bob_rx.try_recv();

        // when (操作): alice が lobby に再参加する
        let joined = usecase
            .execute(alice_id, &alice_name, &alice_outbox, Some(&lobby), RoomName::new("lobby"))
            .await;

        // then (期待する結果): bob には退出→参加の順で通知が届き、所属は 1 つのまま
        assert_eq!(joined, RoomName::new("lobby"));
        assert_eq!(bob_rx.try_recv().unwrap(), "User alice has left the chat.");
        assert_eq!(bob_rx.try_recv().unwrap(), "User alice has joined the chat.");
        assert_eq!(
            registry.list().await,
            vec![RoomSummary {
                name: RoomName::new("lobby"),
                member_count: 2
            }]
        );
    }
}
