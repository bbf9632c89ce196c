//! Durable storage for the application state.
//!
//! The state lives as a single JSON blob under one key of a key/value store,
//! the same shape a browser keeps in local storage:
//!
//! ```text
//! {
//!   "diary":   { "entries": [...], "goals": {...} },
//!   "recipes": { "recipes": [...] }
//! }
//! ```
//!
//! - [`KeyValueStore`]: string key/value backend ([`FileStore`], [`MemoryStore`])
//! - [`Persistence`]: load/save/clear of the blob on top of a backend

mod backend;
mod persistence;

pub use backend::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use persistence::{
    PersistedRecipes, PersistedState, Persistence, PersistenceError, DEFAULT_STORAGE_KEY,
};
