//! クライアントから届く 1 行をプロトコルコマンドへ解釈する純粋関数

use super::RoomName;

/// One parsed line of the client protocol.
///
/// Unrecognized input is never an error: anything that is not a command is
/// treated as a plain chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `JOIN <roomName>` — leave the current room if any, then join/create
    Join(RoomName),
    /// `LEAVE` (case-insensitive) — leave the current room
    Leave,
    /// `LISTROOMS` (case-insensitive) — request a snapshot of rooms
    ListRooms,
    /// Any other text — chat message for the current room
    Chat(String),
}

impl ClientCommand {
    /// Parse one protocol line.
    ///
    /// `JOIN ` is matched as an exact prefix (trailing room name trimmed);
    /// `LEAVE` and `LISTROOMS` match case-insensitively. A lone `JOIN`
    /// without an argument is not a command and falls through to chat.
    pub fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix("JOIN ") {
            Self::Join(RoomName::new(rest))
        } else if line.eq_ignore_ascii_case("LEAVE") {
            Self::Leave
        } else if line.eq_ignore_ascii_case("LISTROOMS") {
            Self::ListRooms
        } else {
            Self::Chat(line.to_string())
        }
    }
}
