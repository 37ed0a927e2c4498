#[derive(Debug, Clone)]
pub enum Message {
    // === SERVER MESSAGES ===
    ServerListening(String),
    ConnectionEstablished,
    ClientConnected,
    ClientDisconnected,
    HeartbeatReceived,
    ProtocolInvalidFrame,

    // === VALIDATION MESSAGES ===
    TaskTextInvalid,
    PriorityInvalid,
    NoteContentEmpty,
    TaskNotFound(i64),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigPromptHost,
    ConfigPromptPort,

    // === DATABASE MESSAGES ===
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    MigrationHistory,
}
