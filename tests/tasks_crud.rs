#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use taskdeck::db::notes::Notes;
    use taskdeck::db::tasks::Tasks;
    use taskdeck::libs::task::Priority;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // The data directory is resolved from HOME, which is process-global;
    // hold a lock for the whole test so parallel tests cannot repoint it.
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct TaskTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TaskTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_and_fetch(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();

        let created = tasks.insert("Buy milk", Priority::Medium).unwrap();
        assert!(created.id.is_some());
        assert!(!created.is_completed);
        assert!(created.timestamp.is_some());
        assert!(created.notes.is_empty());

        let snapshot = tasks.fetch().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].text, "Buy milk");
        assert_eq!(snapshot[0].priority, Priority::Medium);
        assert!(snapshot[0].notes.is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_all_priority_labels_accepted(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();

        for priority in Priority::all() {
            let task = tasks.insert("Task", priority).unwrap();
            assert_eq!(task.priority, priority);
        }
        assert_eq!(tasks.fetch().unwrap().len(), 3);
    }

    #[test]
    fn test_priority_label_parsing() {
        assert_eq!(Priority::from_label("🚨 High Priority"), Some(Priority::High));
        assert_eq!(Priority::from_label("🚧 Medium Priority"), Some(Priority::Medium));
        assert_eq!(Priority::from_label("📗 Low/New Feature"), Some(Priority::Low));
        assert_eq!(Priority::from_label("urgent"), None);
        assert_eq!(Priority::from_label(""), None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_snapshot_order(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();

        let low = tasks.insert("Low", Priority::Low).unwrap();
        let high = tasks.insert("High", Priority::High).unwrap();
        tasks.insert("Medium", Priority::Medium).unwrap();

        // Completed tasks sort after open ones regardless of priority
        tasks.set_completed(high.id.unwrap(), true).unwrap();

        let snapshot = tasks.fetch().unwrap();
        let order: Vec<&str> = snapshot.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["Medium", "Low", "High"]);

        tasks.set_completed(low.id.unwrap(), true).unwrap();
        let snapshot = tasks.fetch().unwrap();
        let order: Vec<&str> = snapshot.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["Medium", "High", "Low"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_completion_moves_partition(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = tasks.insert("Toggle me", Priority::High).unwrap();
        let id = task.id.unwrap();

        tasks.set_completed(id, true).unwrap();
        let fetched = tasks.get_by_id(id).unwrap().unwrap();
        assert!(fetched.is_completed);

        tasks.set_completed(id, false).unwrap();
        let fetched = tasks.get_by_id(id).unwrap().unwrap();
        assert!(!fetched.is_completed);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_change_priority(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = tasks.insert("Reprioritize", Priority::Low).unwrap();
        let id = task.id.unwrap();

        tasks.set_priority(id, Priority::High).unwrap();
        let fetched = tasks.get_by_id(id).unwrap().unwrap();
        assert_eq!(fetched.priority, Priority::High);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_cascades_notes(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let mut notes = Notes::new().unwrap();

        let task = tasks.insert("With notes", Priority::Medium).unwrap();
        let id = task.id.unwrap();
        notes.insert(id, "first").unwrap();
        notes.insert(id, "second").unwrap();
        assert_eq!(notes.fetch_by_task(id).unwrap().len(), 2);

        tasks.delete(id).unwrap();

        assert!(tasks.get_by_id(id).unwrap().is_none());
        assert!(notes.fetch_by_task(id).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_nonexistent_is_silent(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        tasks.delete(9999).unwrap();
        assert!(tasks.fetch().unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_twice_identical(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = tasks.insert("Stable", Priority::High).unwrap();
        Notes::new().unwrap().insert(task.id.unwrap(), "note").unwrap();

        let first = tasks.fetch().unwrap();
        let second = tasks.fetch().unwrap();
        assert_eq!(first, second);
    }
}
