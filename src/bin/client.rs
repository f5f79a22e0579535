//! Interactive chat client.
//!
//! Connects to the chat server, prints incoming lines, and forwards each
//! stdin line. The first line typed is the display name; after that,
//! `JOIN <room>`, `LEAVE`, `LISTROOMS` or plain chat text.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client
//! cargo run --bin client -- --host 192.168.1.10 --port 9001
//! ```

use chat_room_rs::common::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Interactive TCP chat client", long_about = None)]
struct Args {
    /// Host address of the chat server
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number of the chat server
    #[arg(short = 'p', long, default_value = "9001")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = chat_room_rs::client::run_client(args.host, args.port).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
