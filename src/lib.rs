// Library root
// -----------
// This crate exposes the alias operation logic behind the CLI. The binary
// (`main.rs`) wires it to the real HTTP client and the terminal.
//
// Module responsibilities:
// - `validate`: absolute URL check used before creating an alias.
// - `request`: builds the four alias operations from user input.
// - `response`: turns status codes and bodies into typed results.
// - `controller`: runs operations and owns the session state (`state`).
// - `api`: blocking HTTP dispatcher for the remote service.
// - `host`: clipboard and navigation effects, QR payload.
// - `config`, `error`: configuration and the error taxonomy.
// - `ui`: the interactive terminal menu.
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod request;
pub mod response;
pub mod state;
pub mod ui;
pub mod validate;
