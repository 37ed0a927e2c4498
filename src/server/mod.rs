//! HTTP + WebSocket transport for the task store.
//!
//! Two surfaces share one router and one repository layer: the REST variant
//! under `/api` and the WebSocket variant at `/`. Each inbound request or
//! frame performs one independent database call; there is no cross-request
//! locking and no broadcast between connected clients.

/// REST route handlers.
pub mod rest;

/// WebSocket frame taxonomy and dispatch.
pub mod ws;

use crate::libs::config::ServerConfig;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use axum::routing::{any, delete, get, post, put};
use axum::Router;

/// Builds the application router with both API variants mounted.
pub fn router() -> Router {
    Router::new()
        .route("/", any(ws::ws_handler))
        .route("/api/tasks", get(rest::list_tasks))
        .route("/api/task", post(rest::create_task))
        .route("/api/task/{id}", delete(rest::delete_task))
        .route("/api/task/{id}/complete", put(rest::set_complete))
        .route("/api/task/{id}/priority", put(rest::set_priority))
        .route("/api/task/{id}/note", post(rest::add_note))
        .route("/api/note/{task_id}/{note_id}", delete(rest::delete_note))
        .route("/cleanup-null-notes", get(rest::cleanup_null_notes))
}

/// Binds the configured address and serves until shutdown.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    msg_info!(Message::ServerListening(addr));

    axum::serve(listener, router()).await?;
    Ok(())
}
