pub mod config;
pub mod data_storage;
pub mod messages;
pub mod note;
pub mod task;
