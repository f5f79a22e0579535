//! Per-connection session handling.
//!
//! One task per client connection interprets the line protocol and drives
//! room membership through the use cases. The session's protocol states
//! are `Connecting → Naming → Idle ⇄ InRoom → Closed`: the naming phase is
//! the sequential prologue below, Idle/InRoom is `current_room` being
//! `None`/`Some`, and every exit (EOF, I/O fault, server shutdown) funnels
//! through the same teardown at the bottom.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc};

use crate::domain::{ClientCommand, ClientName, RoomName, RoomSummary, SessionId};

use super::connection::{Connection, ConnectionWriter};
use super::state::AppState;

const NAME_PROMPT: &str = "Enter your name:";

/// Spawns the task that drains the session's outbox into the socket.
///
/// This is the only writer for the connection, so lines queued by other
/// sessions' broadcasts and by this session itself never interleave.
/// The task ends when the outbox is dropped or the peer stops accepting
/// writes; dropping the write half closes the socket.
fn writer_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut writer: ConnectionWriter,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.send_line(&line).await.is_err() {
                break;
            }
        }
    })
}

/// Runs one client session to completion.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let session_id = SessionId::new();
    let Connection { mut reader, writer } = Connection::new(stream);
    let (outbox, rx) = mpsc::unbounded_channel();
    let writer_task = writer_loop(rx, writer);

    tracing::info!("Session {} connected from {}", session_id, peer);

    // Naming phase: prompt, then read one line as the display name.
    // The name is opaque text; empty input is accepted as-is.
    let _ = outbox.send(NAME_PROMPT.to_string());
    let name = tokio::select! {
        maybe_line = reader.recv_line() => match maybe_line {
            Some(line) => ClientName::new(line),
            None => {
                tracing::info!("Session {} disconnected before naming", session_id);
                drop(outbox);
                let _ = writer_task.await;
                return;
            }
        },
        _ = shutdown.recv() => {
            drop(outbox);
            let _ = writer_task.await;
            return;
        }
    };
    tracing::debug!("Session {} named itself '{}'", session_id, name);
    let _ = outbox.send(format!(
        "Welcome, {}! Commands: JOIN <room>, LEAVE, LISTROOMS",
        name
    ));

    let mut current_room: Option<RoomName> = None;

    loop {
        let line = tokio::select! {
            maybe_line = reader.recv_line() => match maybe_line {
                Some(line) => line,
                None => break,
            },
            _ = shutdown.recv() => {
                tracing::debug!("Session {} unblocked by server shutdown", session_id);
                break;
            }
        };

        match ClientCommand::parse(&line) {
            ClientCommand::Join(target) => {
                let joined = state
                    .join_room_usecase
                    .execute(session_id, &name, &outbox, current_room.as_ref(), target)
                    .await;
                let _ = outbox.send(format!("You joined the room '{}'.", joined));
                current_room = Some(joined);
            }
            ClientCommand::Leave => match current_room.take() {
                Some(room) => {
                    state.leave_room_usecase.execute(session_id, &room).await;
                    let _ = outbox.send(format!("You left the room '{}'.", room));
                }
                None => {
                    tracing::debug!("Session {} sent LEAVE while in no room", session_id);
                }
            },
            ClientCommand::ListRooms => {
                let rooms = state.list_rooms_usecase.execute().await;
                for line in render_room_list(&rooms) {
                    let _ = outbox.send(line);
                }
            }
            ClientCommand::Chat(text) => match &current_room {
                Some(room) => {
                    if let Err(e) = state
                        .send_message_usecase
                        .execute(session_id, &name, room, &text)
                        .await
                    {
                        tracing::warn!("Chat from session {} dropped: {}", session_id, e);
                    }
                }
                None => {
                    // 未所属のチャットは静かに破棄する（エラー応答なし）
                    tracing::debug!("Dropping chat line from session {} (no room)", session_id);
                }
            },
        }
    }

    // Teardown: the single recovery path for EOF, I/O faults and shutdown.
    if let Some(room) = current_room.take() {
        state.leave_room_usecase.execute(session_id, &room).await;
    }
    drop(outbox); // writer task drains remaining lines, then the socket closes
    let _ = writer_task.await;
    tracing::info!("Session {} disconnected", session_id);
}

/// Render the `LISTROOMS` response lines.
fn render_room_list(rooms: &[RoomSummary]) -> Vec<String> {
    if rooms.is_empty() {
        return vec!["No active rooms.".to_string()];
    }
    let mut lines = Vec::with_capacity(rooms.len() + 1);
    lines.push("Active rooms:".to_string());
    for room in rooms {
        lines.push(format!(" - {} ({} users)", room.name, room.member_count));
    }
    lines
}
