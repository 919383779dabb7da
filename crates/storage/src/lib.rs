#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryKeyValueStore, KeyValueSessionRepository, KeyValueStore, SESSION_KEY,
    SessionRepository, Storage, StorageError,
};
