/// Database model definitions.
pub mod models;
/// Participant persistence and its backends.
pub mod participant_store;
/// Storage abstraction layer for database operations.
pub mod storage;
