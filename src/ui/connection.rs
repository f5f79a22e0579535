//! Line-oriented transport over one accepted TCP connection.
//!
//! The stream is split so the session task can block on reads while a
//! dedicated writer task drains the session's outbox. End of input and
//! I/O faults are both reported as `None` from `recv_line` — the caller
//! has a single teardown path instead of error-based control flow.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

/// One client's connection, split into line-oriented halves.
///
/// Dropping both halves closes the socket exactly once.
pub struct Connection {
    pub reader: ConnectionReader,
    pub writer: ConnectionWriter,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: ConnectionReader {
                lines: BufReader::new(read_half).lines(),
            },
            writer: ConnectionWriter { half: write_half },
        }
    }
}

/// Inbound half: blocking, line-at-a-time reads.
pub struct ConnectionReader {
    lines: Lines<BufReader<OwnedReadHalf>>,
}

impl ConnectionReader {
    /// Receive the next line from the peer.
    ///
    /// Returns `None` when the stream ends or an I/O fault occurs, so the
    /// session can begin teardown.
    pub async fn recv_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!("Read failed, treating as end of stream: {}", e);
                None
            }
        }
    }
}

/// Outbound half: writes one newline-terminated line per call.
pub struct ConnectionWriter {
    half: OwnedWriteHalf,
}

impl ConnectionWriter {
    pub async fn send_line(&mut self, line: &str) -> std::io::Result<()> {
        self.half.write_all(line.as_bytes()).await?;
        self.half.write_all(b"\n").await?;
        Ok(())
    }
}
