//! Room エンティティ
//!
//! 1 つのルームのメンバー集合を保持し、参加・退出の通知と
//! チャットのブロードキャストを行います。
//!
//! ## 並行性
//!
//! `Room` 自体はロックを持ちません。Registry がルームごとに 1 つの
//! `Mutex` で包むことで、同一ルームへの参加・退出・ブロードキャストは
//! 直列化されます（ルームが異なれば競合しません）。

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::{ClientName, RoomName, SessionId};

/// Channel on which lines destined for one session's socket are queued.
///
/// Each session has exactly one writer task draining this channel, so a
/// broadcast is a non-blocking send and never waits on a slow peer.
pub type Outbox = mpsc::UnboundedSender<String>;

/// One member of a room: the display name plus the session's outbox.
#[derive(Debug, Clone)]
pub struct Member {
    name: ClientName,
    outbox: Outbox,
}

impl Member {
    pub fn new(name: ClientName, outbox: Outbox) -> Self {
        Self { name, outbox }
    }
}

/// Named set of member sessions.
///
/// Created lazily on first join and dropped by the registry once the last
/// member leaves, so a live `Room` always has at least one member between
/// registry operations.
#[derive(Debug)]
pub struct Room {
    name: RoomName,
    members: HashMap<SessionId, Member>,
}

impl Room {
    /// 空のルームを作成
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: HashMap::new(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// メンバーを追加し、他の現メンバーへ参加通知をブロードキャストする
    pub fn add_member(&mut self, session_id: SessionId, member: Member) {
        let notice = format!("User {} has joined the chat.", member.name);
        self.members.insert(session_id, member);
        self.broadcast(&notice, session_id);
        tracing::info!(
            "Session {} joined room '{}' ({} members)",
            session_id,
            self.name,
            self.members.len()
        );
    }

    /// メンバーを削除し、残りのメンバーへ退出通知をブロードキャストする
    ///
    /// 存在しないセッションの削除は何もしない（冪等）。
    pub fn remove_member(&mut self, session_id: SessionId) -> Option<Member> {
        let member = self.members.remove(&session_id)?;
        let notice = format!("User {} has left the chat.", member.name);
        self.broadcast(&notice, session_id);
        tracing::info!(
            "Session {} left room '{}' ({} members remain)",
            session_id,
            self.name,
            self.members.len()
        );
        Some(member)
    }

    /// `exclude` 以外の全メンバーへ 1 行を配送する
    ///
    /// 配送はベストエフォート：あるメンバーの outbox が閉じていても、
    /// 残りのメンバーへの配送は継続する。
    pub fn broadcast(&self, line: &str, exclude: SessionId) {
        for (id, member) in &self.members {
            if *id == exclude {
                continue;
            }
            if member.outbox.send(line.to_string()).is_err() {
                tracing::warn!(
                    "Failed to deliver to session {} in room '{}', skipping",
                    id,
                    self.name
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn test_member(name: &str) -> (SessionId, Member, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SessionId::new(), Member::new(ClientName::new(name), tx), rx)
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_add_member_notifies_existing_members_only() {
        // テスト項目: 参加通知が既存メンバーにのみ届き、本人には届かない
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (alice_id, alice, mut alice_rx) = test_member("alice");
        room.add_member(alice_id, alice);

        // when (操作): bob が参加する
        let (bob_id, bob, mut bob_rx) = test_member("bob");
        room.add_member(bob_id, bob);

        // then (期待する結果): alice のみ通知を受け取る
        assert_eq!(drain(&mut alice_rx), vec!["User bob has joined the chat."]);
        assert!(drain(&mut bob_rx).is_empty());
        assert_eq!(room.member_count(), 2);
    }

    #[test]
    fn test_remove_member_notifies_remaining_members() {
        // テスト項目: 退出通知が残りのメンバーに届く
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (alice_id, alice, mut alice_rx) = test_member("alice");
        let (bob_id, bob, _bob_rx) = test_member("bob");
        room.add_member(alice_id, alice);
        room.add_member(bob_id, bob);
        drain(&mut alice_rx); // 参加通知を読み捨てる

        // when (操作): bob が退出する
        let removed = room.remove_member(bob_id);

        // then (期待する結果):
        assert!(removed.is_some());
        assert_eq!(drain(&mut alice_rx), vec!["User bob has left the chat."]);
        assert_eq!(room.member_count(), 1);
    }

    #[test]
    fn test_remove_nonexistent_member_is_noop() {
        // テスト項目: 存在しないメンバーの削除は何もしない（冪等性）
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (alice_id, alice, mut alice_rx) = test_member("alice");
        room.add_member(alice_id, alice);

        // when (操作):
        let removed = room.remove_member(SessionId::new());

        // then (期待する結果): 削除されず、通知も飛ばない
        assert!(removed.is_none());
        assert!(drain(&mut alice_rx).is_empty());
        assert_eq!(room.member_count(), 1);
    }

    #[test]
    fn test_broadcast_excludes_sender() {
        // テスト項目: ブロードキャストが送信者以外の全メンバーへ 1 回ずつ届く
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (alice_id, alice, mut alice_rx) = test_member("alice");
        let (bob_id, bob, mut bob_rx) = test_member("bob");
        let (carol_id, carol, mut carol_rx) = test_member("carol");
        room.add_member(alice_id, alice);
        room.add_member(bob_id, bob);
        room.add_member(carol_id, carol);
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        drain(&mut carol_rx);

        // when (操作): alice がチャットを送信
        room.broadcast("alice: hi", alice_id);

        // then (期待する結果): alice 以外に 1 回ずつ届く
        assert!(drain(&mut alice_rx).is_empty());
        assert_eq!(drain(&mut bob_rx), vec!["alice: hi"]);
        assert_eq!(drain(&mut carol_rx), vec!["alice: hi"]);
    }

    #[test]
    fn test_broadcast_continues_past_closed_outbox() {
        // テスト項目: 一部メンバーの outbox が閉じていても残りへ配送される
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (alice_id, alice, alice_rx) = test_member("alice");
        let (bob_id, bob, mut bob_rx) = test_member("bob");
        let (carol_id, carol, _carol_rx) = test_member("carol");
        room.add_member(alice_id, alice);
        room.add_member(bob_id, bob);
        room.add_member(carol_id, carol);
        drain(&mut bob_rx);
        drop(alice_rx); // alice の受信側を閉じる

        // when (操作): carol がチャットを送信
        room.broadcast("carol: hey", carol_id);

        // then (期待する結果): bob には届く（alice の失敗は無視される）
        assert_eq!(drain(&mut bob_rx), vec!["carol: hey"]);
    }

    #[test]
    fn test_duplicate_display_names_are_distinct_members() {
        // テスト項目: 同じ表示名のセッションが別メンバーとして共存できる
        // given (前提条件):
        let mut room = Room::new(RoomName::new("lobby"));
        let (id1, alice1, mut rx1) = test_member("alice");
        let (id2, alice2, mut rx2) = test_member("alice");
        room.add_member(id1, alice1);
        room.add_member(id2, alice2);
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作): 片方がチャットを送信
        room.broadcast("alice: which alice?", id1);

        // then (期待する結果): もう片方にのみ届く
        assert!(drain(&mut rx1).is_empty());
        assert_eq!(drain(&mut rx2), vec!["alice: which alice?"]);
        assert_eq!(room.member_count(), 2);
    }
}
