//! Room-based TCP chat application library.
//!
//! This library provides the server and client implementations for a
//! newline-delimited TCP chat with named rooms: clients join/leave rooms
//! and chat lines are relayed to the other members of the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// client
pub mod client;

// shared library
pub mod common;
