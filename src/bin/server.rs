//! Room-based TCP chat server.
//!
//! Accepts client connections, lets each one join/leave named rooms, and
//! relays chat lines to the other members of the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 9001
//! ```

use std::sync::Arc;

use chat_room_rs::{
    common::logger::setup_logger,
    infrastructure::InMemoryRoomRegistry,
    ui::Server,
    usecase::{JoinRoomUseCase, LeaveRoomUseCase, ListRoomsUseCase, SendMessageUseCase},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "TCP chat server with named rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "9001")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create the shared room registry (in-memory)
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 2. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        send_message_usecase,
        list_rooms_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
