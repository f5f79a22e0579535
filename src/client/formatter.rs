//! Formatting for the client's local echo.
//!
//! The server never echoes a sender's own message back, so the client
//! prints its own lines locally with a receive-side timestamp prefix.

use crate::common::time::{Clock, format_hms};

/// Format a locally-echoed line as `[HH:MM:SS] You: <text>`.
pub fn format_local_echo(clock: &dyn Clock, text: &str) -> String {
    format!("[{}] You: {}", format_hms(clock.now_local()), text)
}
