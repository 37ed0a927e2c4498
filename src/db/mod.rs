//! Database layer for the taskdeck server.
//!
//! A persistence layer built on SQLite with a versioned migration system.
//! Each table gets its own module exposing a small typed handle, and every
//! handle opens its own connection through [`db::Db`], so each request
//! performs one independent database call.

/// Core database connection and initialization module.
pub mod db;

/// Database schema migration system.
pub mod migrations;

/// Per-task note operations.
pub mod notes;

/// Core task CRUD operations and the denormalized snapshot query.
pub mod tasks;
