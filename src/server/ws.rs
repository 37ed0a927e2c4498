//! WebSocket variant of the task API.
//!
//! Clients exchange JSON frames of the form `{type, ...payload}`. Every
//! mutation is acknowledged with a typed reply carrying the identifiers the
//! client needs, and the client re-requests the full snapshot after each
//! acknowledgement, so there is no fan-out between connections: each client
//! only ever receives responses to its own requests.
//!
//! Storage failures become `error` frames carrying the failure text; the
//! connection is never torn down for them. Malformed JSON gets a generic
//! protocol error, also without closing the connection.

use crate::db::notes::Notes;
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Priority, Task, MAX_TASK_TEXT_LEN};
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use axum::extract::ws::{Message as WsFrame, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Payload of an `addTask` frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskPayload {
    pub text: String,
    pub priority: String,
}

/// Payload of an `addNote` frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub task_id: i64,
    pub content: String,
}

/// Inbound frame taxonomy.
///
/// Priorities travel as raw labels rather than [`Priority`] so an unknown
/// label is answered with a typed validation error instead of failing the
/// whole frame parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    FetchTasks,
    AddTask {
        task: TaskPayload,
    },
    #[serde(rename_all = "camelCase")]
    ToggleCompleteTask {
        task_id: i64,
        completed: bool,
    },
    #[serde(rename_all = "camelCase")]
    ChangePriority {
        task_id: i64,
        priority: String,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTask {
        task_id: i64,
    },
    AddNote {
        note: NotePayload,
    },
    #[serde(rename_all = "camelCase")]
    DeleteNote {
        task_id: i64,
        note_id: i64,
    },
    Heartbeat,
}

/// Outbound frame taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    Connection {
        message: String,
    },
    Update {
        tasks: Vec<Task>,
    },
    TaskAdded {
        task: Task,
    },
    TaskUpdated {
        id: i64,
        completed: bool,
    },
    PriorityUpdated {
        id: i64,
        priority: Priority,
    },
    TaskDeleted {
        id: i64,
    },
    #[serde(rename_all = "camelCase")]
    NoteAdded {
        task_id: i64,
        note_id: i64,
    },
    #[serde(rename_all = "camelCase")]
    NoteDeleted {
        task_id: i64,
        note_id: i64,
    },
    Error {
        message: String,
    },
}

pub async fn ws_handler(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    msg_debug!(Message::ClientConnected);

    let greeting = ServerMessage::Connection {
        message: Message::ConnectionEstablished.to_string(),
    };
    if send(&mut socket, &greeting).await.is_err() {
        return;
    }

    while let Some(frame) = socket.recv().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(_) => break,
        };
        match frame {
            WsFrame::Text(text) => {
                if let Some(reply) = handle_frame(text.as_str()) {
                    if send(&mut socket, &reply).await.is_err() {
                        break;
                    }
                }
            }
            WsFrame::Close(_) => break,
            // Ping/pong is answered by axum itself
            _ => {}
        }
    }

    msg_debug!(Message::ClientDisconnected);
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> Result<()> {
    let json = serde_json::to_string(message)?;
    socket.send(WsFrame::Text(json.into())).await?;
    Ok(())
}

/// Parses and dispatches one raw text frame.
///
/// Returns `None` when no reply is owed (heartbeats). Parse failures and
/// storage errors both come back as `error` frames.
pub fn handle_frame(text: &str) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => dispatch(message),
        Err(_) => Some(ServerMessage::Error {
            message: Message::ProtocolInvalidFrame.to_string(),
        }),
    }
}

/// Executes one inbound message against the store.
pub fn dispatch(message: ClientMessage) -> Option<ServerMessage> {
    match run(message) {
        Ok(reply) => reply,
        Err(e) => Some(ServerMessage::Error { message: e.to_string() }),
    }
}

fn run(message: ClientMessage) -> Result<Option<ServerMessage>> {
    let reply = match message {
        ClientMessage::Heartbeat => {
            msg_debug!(Message::HeartbeatReceived);
            return Ok(None);
        }
        ClientMessage::FetchTasks => {
            let tasks = Tasks::new()?.fetch()?;
            ServerMessage::Update { tasks }
        }
        ClientMessage::AddTask { task } => {
            if task.text.chars().count() > MAX_TASK_TEXT_LEN {
                msg_bail_anyhow!(Message::TaskTextInvalid);
            }
            let Some(priority) = Priority::from_label(&task.priority) else {
                msg_bail_anyhow!(Message::PriorityInvalid);
            };
            let task = Tasks::new()?.insert(&task.text, priority)?;
            ServerMessage::TaskAdded { task }
        }
        ClientMessage::ToggleCompleteTask { task_id, completed } => {
            Tasks::new()?.set_completed(task_id, completed)?;
            ServerMessage::TaskUpdated {
                id: task_id,
                completed,
            }
        }
        ClientMessage::ChangePriority { task_id, priority } => {
            let Some(priority) = Priority::from_label(&priority) else {
                msg_bail_anyhow!(Message::PriorityInvalid);
            };
            Tasks::new()?.set_priority(task_id, priority)?;
            ServerMessage::PriorityUpdated { id: task_id, priority }
        }
        ClientMessage::DeleteTask { task_id } => {
            Tasks::new()?.delete(task_id)?;
            ServerMessage::TaskDeleted { id: task_id }
        }
        ClientMessage::AddNote { note } => {
            if note.content.trim().is_empty() {
                msg_bail_anyhow!(Message::NoteContentEmpty);
            }
            let note_id = Notes::new()?.insert(note.task_id, &note.content)?;
            ServerMessage::NoteAdded {
                task_id: note.task_id,
                note_id,
            }
        }
        ClientMessage::DeleteNote { task_id, note_id } => {
            Notes::new()?.delete(task_id, note_id)?;
            ServerMessage::NoteDeleted { task_id, note_id }
        }
    };

    Ok(Some(reply))
}
