//! Client session loop: prints server lines, forwards stdin lines.

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::common::time::SystemClock;
use crate::domain::ClientCommand;

use super::formatter::format_local_echo;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server address could not be reached
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// I/O error on the established connection or stdin
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the interactive client until stdin or the server connection closes.
///
/// The first line the user types is the display name (the server prompts
/// for it); after that, lines are protocol commands or chat text. Own chat
/// lines are echoed locally with a timestamp since the server only relays
/// to the other room members.
pub async fn run_client(host: String, port: u16) -> Result<(), ClientError> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connect {
            addr: addr.clone(),
            source,
        })?;
    println!("Connected to server on {}", addr);

    let (read_half, mut write_half) = stream.into_split();

    // Print every server line as it arrives
    let mut print_task = tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("{}", line);
        }
        tracing::info!("Server closed the connection");
    });

    let clock = SystemClock;
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = &mut print_task => break, // server gone
            maybe_line = stdin.next_line() => {
                let Some(line) = maybe_line? else {
                    break; // stdin closed
                };
                write_half.write_all(line.as_bytes()).await?;
                write_half.write_all(b"\n").await?;

                // Commands get a server response; chat does not, so echo it
                if matches!(ClientCommand::parse(&line), ClientCommand::Chat(_)) {
                    println!("{}", format_local_echo(&clock, &line));
                }
            }
        }
    }

    print_task.abort();
    Ok(())
}
