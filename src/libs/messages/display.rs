//! Display implementation for taskdeck application messages.
//!
//! All user-facing and wire-facing message text lives here, so every string
//! the application emits has a single source of truth. Validation messages
//! double as API error payloads, which is why their wording matches the
//! protocol exactly (`Invalid 'priority' field`, `Note Content Empty`).

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Server running on http://{}", addr),
            Message::ConnectionEstablished => "Connected to the task server".to_string(),
            Message::ClientConnected => "WebSocket client connected".to_string(),
            Message::ClientDisconnected => "WebSocket client disconnected".to_string(),
            Message::HeartbeatReceived => "Heartbeat received".to_string(),
            Message::ProtocolInvalidFrame => "Invalid message format".to_string(),

            // === VALIDATION MESSAGES ===
            Message::TaskTextInvalid => "Invalid 'text' field".to_string(),
            Message::PriorityInvalid => "Invalid 'priority' field".to_string(),
            Message::NoteContentEmpty => "Note Content Empty".to_string(),
            Message::TaskNotFound(id) => format!("Task {} not found", id),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigPromptHost => "Server host".to_string(),
            Message::ConfigPromptPort => "Server port".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs migration".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", text)
    }
}
