//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とするルーム管理のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::{Member, RoomName, SessionId};

/// Registry 操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// 対象のルームが存在しない
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// `list()` が返すルームのスナップショット 1 件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub member_count: usize,
}

/// Room Registry trait
///
/// ルーム名から Room への共有マッピング。全セッションから並行に
/// アクセスされるため、実装は以下を原子的に行う必要があります：
///
/// - `join`: ルームの遅延生成とメンバー追加（同名ルームは常に 1 インスタンス）
/// - `leave`: メンバー削除と、空になったルームの即時削除
///
/// ## 依存性の逆転（DIP）
///
/// - ドメイン層が必要とするインターフェースをドメイン層自身が定義
/// - Infrastructure 層がこの trait を実装
/// - UseCase 層はこの trait にのみ依存する
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// ルームに参加する
    ///
    /// ルームが存在しなければ作成し、メンバーを追加した上で
    /// 他の現メンバーへ参加通知をブロードキャストする。
    async fn join(&self, room_name: &RoomName, session_id: SessionId, member: Member);

    /// ルームから退出する
    ///
    /// メンバーを削除し、残りのメンバーへ退出通知をブロードキャストする。
    /// 退出によりルームが空になった場合、ルーム自体を削除する。
    /// メンバーが実際に削除された場合 `true` を返す。
    async fn leave(&self, room_name: &RoomName, session_id: SessionId) -> bool;

    /// `exclude` 以外の全メンバーへチャット 1 行をブロードキャストする
    async fn broadcast(
        &self,
        room_name: &RoomName,
        line: &str,
        exclude: SessionId,
    ) -> Result<(), RegistryError>;

    /// ルーム名とメンバー数のスナップショットを取得（ルーム名順）
    async fn list(&self) -> Vec<RoomSummary>;
}
