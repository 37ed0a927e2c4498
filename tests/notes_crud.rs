#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use taskdeck::db::notes::Notes;
    use taskdeck::db::tasks::Tasks;
    use taskdeck::libs::task::Priority;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct NoteTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for NoteTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            NoteTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_insert_and_fetch(_ctx: &mut NoteTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();
        let task_id = tasks.insert("Buy milk", Priority::Medium).unwrap().id.unwrap();

        let note_id = notes.insert(task_id, "2%").unwrap();
        assert!(note_id > 0);

        let fetched = notes.fetch_by_task(task_id).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, Some(note_id));
        assert_eq!(fetched[0].content, "2%");
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_notes_appear_in_snapshot(_ctx: &mut NoteTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();
        let task_id = tasks.insert("Buy milk", Priority::Medium).unwrap().id.unwrap();
        notes.insert(task_id, "2%").unwrap();

        let snapshot = tasks.fetch().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].notes.len(), 1);
        assert_eq!(snapshot[0].notes[0].content, "2%");
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_delete_note(_ctx: &mut NoteTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();
        let task_id = tasks.insert("Task", Priority::High).unwrap().id.unwrap();
        let note_id = notes.insert(task_id, "remove me").unwrap();

        let affected = notes.delete(task_id, note_id).unwrap();
        assert_eq!(affected, 1);
        assert!(notes.fetch_by_task(task_id).unwrap().is_empty());
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_delete_nonexistent_note_is_silent(_ctx: &mut NoteTestContext) {
        let mut notes = Notes::new().unwrap();
        let affected = notes.delete(1, 9999).unwrap();
        assert_eq!(affected, 0);
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_delete_requires_matching_task(_ctx: &mut NoteTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();
        let task_id = tasks.insert("Task", Priority::Low).unwrap().id.unwrap();
        let note_id = notes.insert(task_id, "keep me").unwrap();

        // A mismatched task id must not remove the note
        let affected = notes.delete(task_id + 1, note_id).unwrap();
        assert_eq!(affected, 0);
        assert_eq!(notes.fetch_by_task(task_id).unwrap().len(), 1);
    }

    #[test_context(NoteTestContext)]
    #[test]
    fn test_cleanup_null_on_clean_store(_ctx: &mut NoteTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();
        let task_id = tasks.insert("Task", Priority::Medium).unwrap().id.unwrap();
        notes.insert(task_id, "valid").unwrap();

        let affected = notes.cleanup_null().unwrap();
        assert_eq!(affected, 0);
        assert_eq!(notes.fetch_by_task(task_id).unwrap().len(), 1);
    }
}
