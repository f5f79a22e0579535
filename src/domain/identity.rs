//! 値オブジェクト: セッション ID・表示名・ルーム名
//!
//! ## 設計ノート
//!
//! セッションの一意なキーは `SessionId`（uuid v4）です。表示名
//! （`ClientName`）は重複を許容するため、キーとしては使用しません。
//! 表示名・ルーム名ともに検証ポリシーは未定義で、空文字列もそのまま
//! 受け入れます（既知のギャップ）。

use std::fmt;

use uuid::Uuid;

/// Unique identity of one client session.
///
/// Display names may collide, so every piece of shared state is keyed by
/// this id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name a client announces as its first protocol line.
///
/// Treated as opaque text: duplicates and the empty string are accepted
/// as-is (no validation policy is specified).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientName(String);

impl ClientName {
    /// 表示名を作成（検証なし、そのまま保持）
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a chat room, used as the registry key.
///
/// Taken verbatim from the text after the `JOIN ` prefix, trimmed of
/// surrounding whitespace. An empty name is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    /// ルーム名を作成（前後の空白のみ除去）
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
