//! # Taskdeck - Personal Task Tracking Server
//!
//! A small HTTP + WebSocket server for tracking personal tasks,
//! backed by a two-table SQLite store.
//!
//! ## Features
//!
//! - **Task Management**: Create tasks, toggle completion, change priority
//! - **Notes**: Attach free-form notes to tasks, with cascading cleanup
//! - **REST API**: Conventional JSON endpoints under `/api`
//! - **WebSocket API**: Typed `{type, ...}` frames with full-snapshot refresh
//! - **Migrations**: Versioned schema evolution for the SQLite store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
