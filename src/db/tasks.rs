use super::db::Db;
use crate::libs::messages::Message;
use crate::libs::note::Note;
use crate::libs::task::{sort_snapshot, Priority, Task};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER NOT NULL PRIMARY KEY,
    text TEXT NOT NULL,
    priority TEXT NOT NULL,
    is_completed INTEGER NOT NULL ON CONFLICT REPLACE DEFAULT 0,
    timestamp TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_TASK: &str = "INSERT INTO tasks (timestamp, text, priority, is_completed) VALUES (?1, ?2, ?3, ?4)";
// One row per task with its notes aggregated into a JSON array. A task with
// zero notes still produces one array entry whose fields are all NULL; the
// caller filters those out.
const SELECT_SNAPSHOT: &str = "
    SELECT t.id, t.text, t.priority, t.is_completed, t.timestamp,
           json_group_array(json_object('id', n.id, 'content', n.note)) AS notes
    FROM tasks t
    LEFT JOIN notes n ON n.task_id = t.id
";
const WHERE_ID: &str = "WHERE t.id = ?1";
const GROUP_BY_TASK: &str = "GROUP BY t.id";
const UPDATE_COMPLETED: &str = "UPDATE tasks SET is_completed = ?2 WHERE id = ?1";
const UPDATE_PRIORITY: &str = "UPDATE tasks SET priority = ?2 WHERE id = ?1";
const DELETE_TASK_NOTES: &str = "DELETE FROM notes WHERE task_id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks> {
        let db = Db::new()?;
        // Migration v1 creates the table, but we ensure here too
        db.conn.execute(SCHEMA_TASKS, [])?;

        Ok(Tasks { conn: db.conn })
    }

    /// Inserts a new task and returns the stored record.
    ///
    /// New tasks always start in the open partition; the timestamp is
    /// assigned by the database in local time.
    pub fn insert(&mut self, text: &str, priority: Priority) -> Result<Task> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.conn.execute(INSERT_TASK, params![timestamp, text, priority, false])?;
        let id = self.conn.last_insert_rowid();

        self.get_by_id(id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))
    }

    /// Fetches the full denormalized snapshot: every task with its notes,
    /// ordered incomplete-before-completed, then by priority rank.
    pub fn fetch(&mut self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!("{} {}", SELECT_SNAPSHOT, GROUP_BY_TASK))?;
        let rows = stmt.query_map([], Self::map_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            let (mut task, raw_notes) = row?;
            task.notes = parse_notes(&raw_notes)?;
            tasks.push(task);
        }
        sort_snapshot(&mut tasks);

        Ok(tasks)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Task>> {
        let sql = format!("{} {} {}", SELECT_SNAPSHOT, WHERE_ID, GROUP_BY_TASK);
        let row = self
            .conn
            .query_row(&sql, params![id], Self::map_row)
            .optional()?;

        match row {
            Some((mut task, raw_notes)) => {
                task.notes = parse_notes(&raw_notes)?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// Sets the completion flag, moving the task between partitions.
    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<()> {
        self.conn.execute(UPDATE_COMPLETED, params![id, completed])?;
        Ok(())
    }

    /// Replaces the priority label.
    pub fn set_priority(&mut self, id: i64, priority: Priority) -> Result<()> {
        self.conn.execute(UPDATE_PRIORITY, params![id, priority])?;
        Ok(())
    }

    /// Deletes a task and its notes.
    ///
    /// Notes go first so they cannot outlive the task. The two statements
    /// are intentionally sequential rather than transactional, and deleting
    /// a nonexistent id succeeds silently.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_TASK_NOTES, params![id])?;
        self.conn.execute(DELETE_TASK, params![id])?;
        Ok(())
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(Task, String)> {
        Ok((
            Task {
                id: row.get(0)?,
                text: row.get(1)?,
                priority: row.get(2)?,
                is_completed: row.get(3)?,
                timestamp: row.get(4)?,
                notes: Vec::new(),
            },
            row.get(5)?,
        ))
    }
}

/// Parses the aggregated notes column, dropping the all-NULL entry the
/// LEFT JOIN produces for tasks without notes.
fn parse_notes(raw: &str) -> Result<Vec<Note>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let notes = values
        .into_iter()
        .filter(|value| !value["id"].is_null() && !value["content"].is_null())
        .map(serde_json::from_value)
        .collect::<Result<Vec<Note>, _>>()?;

    Ok(notes)
}
