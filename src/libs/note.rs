use serde::{Deserialize, Serialize};

/// A free-text annotation attached to a task.
///
/// Serialized as `{id, content}` inside task snapshots; the owning task id
/// travels separately in the protocol payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub content: String,
}
