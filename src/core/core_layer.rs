// The core module contains the chat feed logic.
// Nothing in here talks HTTP; the infra layer implements the ports defined below.

#[path = "remote/remote_error.rs"]
pub mod remote;

#[path = "drive/mod.rs"]
pub mod drive;

#[path = "sheets/mod.rs"]
pub mod sheets;

#[path = "timestamps/timestamp_formatter.rs"]
pub mod timestamps;

#[path = "chat/mod.rs"]
pub mod chat;
