//! REST variant of the task API.
//!
//! All endpoints speak JSON and answer failures with `{"error": …}` and
//! HTTP 400, storage errors surfaced verbatim. Replies wrap their payload in
//! a `message` envelope; the snapshot rides in `data`.

use crate::db::notes::Notes;
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Priority, MAX_TASK_TEXT_LEN};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Error reply carrying the failure text, rendered as `{"error": …}`
/// with HTTP 400.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request validation failure with protocol wording.
    #[error("{0}")]
    Validation(String),
    /// Storage failure surfaced verbatim.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn message(message: Message) -> Self {
        ApiError::Validation(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
    pub priority: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct PriorityRequest {
    pub priority: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

/// `GET /api/tasks`
pub async fn list_tasks() -> Result<Json<Value>, ApiError> {
    let tasks = Tasks::new()?.fetch()?;
    Ok(Json(json!({ "message": "success", "data": tasks })))
}

/// `POST /api/task`
pub async fn create_task(Json(request): Json<CreateTaskRequest>) -> Result<Json<Value>, ApiError> {
    if request.text.chars().count() > MAX_TASK_TEXT_LEN {
        return Err(ApiError::message(Message::TaskTextInvalid));
    }
    let priority = Priority::from_label(&request.priority).ok_or_else(|| ApiError::message(Message::PriorityInvalid))?;

    let task = Tasks::new()?.insert(&request.text, priority)?;
    Ok(Json(json!({ "message": "success", "id": task.id })))
}

/// `DELETE /api/task/{id}` - removes the task and all of its notes.
pub async fn delete_task(Path(id): Path<i64>) -> Result<Json<Value>, ApiError> {
    Tasks::new()?.delete(id)?;
    Ok(Json(json!({ "message": "task and its notes deleted", "id": id })))
}

/// `PUT /api/task/{id}/complete`
pub async fn set_complete(Path(id): Path<i64>, Json(request): Json<CompleteRequest>) -> Result<Json<Value>, ApiError> {
    Tasks::new()?.set_completed(id, request.completed)?;
    Ok(Json(json!({ "message": "updated", "id": id })))
}

/// `PUT /api/task/{id}/priority`
pub async fn set_priority(Path(id): Path<i64>, Json(request): Json<PriorityRequest>) -> Result<Json<Value>, ApiError> {
    let priority = Priority::from_label(&request.priority).ok_or_else(|| ApiError::message(Message::PriorityInvalid))?;

    Tasks::new()?.set_priority(id, priority)?;
    Ok(Json(json!({ "message": "priority updated", "id": id })))
}

/// `POST /api/task/{id}/note`
pub async fn add_note(Path(id): Path<i64>, Json(request): Json<NoteRequest>) -> Result<Json<Value>, ApiError> {
    if request.note.trim().is_empty() {
        return Err(ApiError::message(Message::NoteContentEmpty));
    }

    let note_id = Notes::new()?.insert(id, &request.note)?;
    Ok(Json(json!({ "message": "note added", "id": note_id })))
}

/// `DELETE /api/note/{task_id}/{note_id}`
pub async fn delete_note(Path((task_id, note_id)): Path<(i64, i64)>) -> Result<Json<Value>, ApiError> {
    Notes::new()?.delete(task_id, note_id)?;
    Ok(Json(json!({ "message": "note deleted", "noteId": note_id })))
}

/// `GET /cleanup-null-notes` - maintenance sweep for the join artifact rows.
pub async fn cleanup_null_notes() -> Result<Json<Value>, ApiError> {
    Notes::new()?.cleanup_null()?;
    Ok(Json(json!({ "message": "Null notes cleaned up successfully" })))
}
