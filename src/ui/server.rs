//! Server execution logic.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::usecase::{JoinRoomUseCase, LeaveRoomUseCase, ListRoomsUseCase, SendMessageUseCase};

use super::session::handle_connection;
use super::signal::shutdown_signal;
use super::state::AppState;

/// Fatal server errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bind/listen fault: the address is unusable (port in use, permission denied)
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// Other I/O error on the listening socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// TCP chat server
///
/// Accepts connections in a loop and spawns one session task per client.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     leave_room_usecase,
///     send_message_usecase,
///     list_rooms_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 9001).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    list_rooms_usecase: Arc<ListRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            send_message_usecase,
            list_rooms_usecase,
        }
    }

    /// Run the chat server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 9001)
    ///
    /// # Errors
    ///
    /// A bind fault is fatal and reported as `ServerError::Bind`.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr,
                source,
            })?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.run_with_listener(listener, shutdown_signal()).await
    }

    /// Accept loop over an already-bound listener.
    ///
    /// Separated from [`run`](Self::run) so tests can bind to an ephemeral
    /// port and supply their own shutdown future.
    pub async fn run_with_listener(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), ServerError> {
        let state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            send_message_usecase: self.send_message_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
        });

        // Sessions subscribe to this channel so a pending read unblocks
        // when the server stops.
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tokio::spawn(handle_connection(
                                stream,
                                peer,
                                state.clone(),
                                shutdown_tx.subscribe(),
                            ));
                        }
                        Err(e) => {
                            // 一時的な accept 失敗はログだけ残して継続する
                            tracing::warn!("Failed to accept connection: {}", e);
                        }
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        // Close the accepting socket, then tell live sessions to tear down.
        drop(listener);
        let live_sessions = shutdown_tx.receiver_count();
        if live_sessions > 0 {
            let _ = shutdown_tx.send(());
            tracing::info!("Notified {} live sessions to close", live_sessions);
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
