use super::db::Db;
use crate::libs::note::Note;
use anyhow::Result;
use rusqlite::{params, Connection};

const SCHEMA_NOTES: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER NOT NULL PRIMARY KEY,
    task_id INTEGER NOT NULL,
    note TEXT NOT NULL
)";
const INSERT_NOTE: &str = "INSERT INTO notes (task_id, note) VALUES (?1, ?2)";
const SELECT_NOTES_BY_TASK: &str = "SELECT id, note FROM notes WHERE task_id = ?1 ORDER BY id";
const DELETE_NOTE: &str = "DELETE FROM notes WHERE task_id = ?1 AND id = ?2";
const DELETE_NULL_NOTES: &str = "DELETE FROM notes WHERE id IS NULL OR note IS NULL";

pub struct Notes {
    pub conn: Connection,
}

impl Notes {
    pub fn new() -> Result<Notes> {
        let db = Db::new()?;
        // Migration v1 creates the table, but we ensure here too
        db.conn.execute(SCHEMA_NOTES, [])?;

        Ok(Notes { conn: db.conn })
    }

    /// Inserts a note for a task and returns the new note id.
    pub fn insert(&mut self, task_id: i64, content: &str) -> Result<i64> {
        self.conn.execute(INSERT_NOTE, params![task_id, content])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetches all notes belonging to a task, in insertion order.
    pub fn fetch_by_task(&mut self, task_id: i64) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(SELECT_NOTES_BY_TASK)?;
        let note_iter = stmt.query_map(params![task_id], |row| {
            Ok(Note {
                id: row.get(0)?,
                content: row.get(1)?,
            })
        })?;

        let mut notes = Vec::new();
        for note in note_iter {
            notes.push(note?);
        }
        Ok(notes)
    }

    /// Deletes a single note; returns the number of rows removed.
    ///
    /// Deleting a note that does not exist succeeds silently.
    pub fn delete(&mut self, task_id: i64, note_id: i64) -> Result<usize> {
        let affected = self.conn.execute(DELETE_NOTE, params![task_id, note_id])?;
        Ok(affected)
    }

    /// Maintenance sweep removing note rows with a NULL id or content.
    pub fn cleanup_null(&mut self) -> Result<usize> {
        let affected = self.conn.execute(DELETE_NULL_NOTES, [])?;
        Ok(affected)
    }
}
