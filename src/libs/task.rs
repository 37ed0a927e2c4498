use crate::libs::note::Note;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted length for a task's text body, in characters.
pub const MAX_TASK_TEXT_LEN: usize = 5000;

/// The fixed set of priority labels a task can carry.
///
/// Labels are stored in the database and sent over the wire verbatim,
/// so the emoji prefixes are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "🚨 High Priority")]
    High,
    #[serde(rename = "🚧 Medium Priority")]
    Medium,
    #[serde(rename = "📗 Low/New Feature")]
    Low,
}

impl Priority {
    pub fn as_label(&self) -> &'static str {
        match self {
            Priority::High => "🚨 High Priority",
            Priority::Medium => "🚧 Medium Priority",
            Priority::Low => "📗 Low/New Feature",
        }
    }

    /// Parses a priority label, returning `None` for anything outside
    /// the fixed set.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "🚨 High Priority" => Some(Priority::High),
            "🚧 Medium Priority" => Some(Priority::Medium),
            "📗 Low/New Feature" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Sort rank within a completion partition: high before medium before low.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn all() -> [Priority; 3] {
        [Priority::High, Priority::Medium, Priority::Low]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_label().into())
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        Priority::from_label(label).ok_or(FromSqlError::InvalidType)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub text: String,
    pub priority: Priority,
    pub is_completed: bool,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// Orders a snapshot for display: incomplete tasks first, then by fixed
/// priority rank within each partition.
pub fn sort_snapshot(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.is_completed, task.priority.rank()));
}
