//! Serialization of the whole application state to a key/value backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::backend::{KeyValueStore, StorageError};
use crate::models::Recipe;
use crate::store::{AppState, DiaryState};

/// Key the state blob is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "sport_app_state";

/// Errors from loading, saving or clearing the persisted state.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read persisted state: {0}")]
    Read(#[source] StorageError),

    #[error("Failed to write persisted state: {0}")]
    Write(#[source] StorageError),

    #[error("Failed to clear persisted state: {0}")]
    Clear(#[source] StorageError),

    #[error("Persisted state is malformed: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The blob as read back from storage.
///
/// Every slice is optional so that each one hydrates on its own: a blob
/// without a diary still yields the stored recipes, and the other way round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub diary: Option<DiaryState>,
    #[serde(default)]
    pub recipes: Option<PersistedRecipes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecipes {
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,
}

impl PersistedState {
    pub fn diary(&self) -> Option<&DiaryState> {
        self.diary.as_ref()
    }

    pub fn recipes(&self) -> Option<&Vec<Recipe>> {
        self.recipes.as_ref().and_then(|r| r.recipes.as_ref())
    }
}

/// Loads and saves the application state under a single storage key.
#[derive(Clone, Debug)]
pub struct Persistence<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Persistence under [`DEFAULT_STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads and parses the blob.
    ///
    /// Returns `Ok(None)` if nothing was ever saved (or it was cleared), and
    /// an error only when the blob is not JSON at all. Each slice is decoded
    /// on its own, so a malformed recipe list still yields the stored diary.
    pub fn try_load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        let raw = match self
            .backend
            .get_item(&self.key)
            .map_err(PersistenceError::Read)?
        {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let blob: serde_json::Value =
            serde_json::from_str(&raw).map_err(PersistenceError::Parse)?;

        Ok(Some(PersistedState {
            diary: self.read_slice("diary", blob.get("diary")),
            recipes: self
                .read_slice(
                    "recipes",
                    blob.get("recipes").and_then(|r| r.get("recipes")),
                )
                .map(|recipes| PersistedRecipes {
                    recipes: Some(recipes),
                }),
        }))
    }

    /// Decodes one slice of the blob. A slice that is missing, `null` or of
    /// the wrong shape yields `None` without affecting the others.
    fn read_slice<T: DeserializeOwned>(&self, name: &str, value: Option<&Value>) -> Option<T> {
        match value {
            None | Some(Value::Null) => None,
            Some(value) => match T::deserialize(value) {
                Ok(slice) => Some(slice),
                Err(e) => {
                    tracing::warn!(
                        "Ignoring malformed '{}' slice under '{}': {}",
                        name,
                        self.key,
                        e
                    );
                    None
                }
            },
        }
    }

    /// Like [`try_load`](Self::try_load), but unreadable or corrupt data is
    /// logged and reported as absent.
    pub fn load(&self) -> Option<PersistedState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring persisted state under '{}': {}", self.key, e);
                None
            }
        }
    }

    /// Serializes the full state and writes it under the key.
    pub fn save(&self, state: &AppState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(state).map_err(PersistenceError::Serialize)?;
        self.backend
            .set_item(&self.key, &json)
            .map_err(PersistenceError::Write)?;

        tracing::debug!("Saved {} bytes under '{}'", json.len(), self.key);
        Ok(())
    }

    /// Removes the blob entirely.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend
            .remove_item(&self.key)
            .map_err(PersistenceError::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiaryEntry, DiaryGoals};
    use crate::storage::{FileStore, MemoryStore};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        state.diary.add_entry(
            DiaryEntry::meal("Salad", 250.0)
                .with_id("1")
                .with_macros(8.0, 20.0, 10.0)
                .with_notes("lunch"),
            created,
        );
        state.diary.add_entry(
            DiaryEntry::exercise("Run", 300.0)
                .with_id("2")
                .with_duration(30.0),
            created,
        );
        state.diary.set_goals(DiaryGoals::new(1800.0, 120.0, 60.0, 200.0));
        state.recipes.delete_recipe("3");
        state
    }

    #[test]
    fn test_load_absent_returns_none() {
        let persistence = Persistence::new(MemoryStore::new());
        assert!(persistence.try_load().unwrap().is_none());
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let persistence = Persistence::new(MemoryStore::new());
        let state = sample_state();

        persistence.save(&state).unwrap();
        let loaded = AppState::hydrate(persistence.load());

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = Persistence::new(FileStore::new(temp_dir.path().to_path_buf()));
        let state = sample_state();

        persistence.save(&state).unwrap();
        assert!(persistence.backend().exists(DEFAULT_STORAGE_KEY));

        let loaded = AppState::hydrate(persistence.load());
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_saved_blob_layout() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(store.clone());
        persistence.save(&sample_state()).unwrap();

        let raw = store.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(json["diary"]["entries"].is_array());
        assert_eq!(json["diary"]["goals"]["dailyCalories"], 1800.0);
        assert_eq!(json["recipes"]["recipes"].as_array().unwrap().len(), 5);
        assert_eq!(json["diary"]["entries"][1]["type"], "exercise");
    }

    #[test]
    fn test_malformed_json_is_absent() {
        let store = MemoryStore::new();
        store.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store);

        assert!(matches!(
            persistence.try_load(),
            Err(PersistenceError::Parse(_))
        ));
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_wrong_shape_slice_does_not_drop_the_other() {
        let store = MemoryStore::new();
        store
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"{"diary": {"entries": 42}, "recipes": {"recipes": []}}"#,
            )
            .unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load().unwrap();
        assert!(loaded.diary().is_none());
        assert_eq!(loaded.recipes().map(Vec::len), Some(0));
    }

    #[test]
    fn test_malformed_recipes_keep_diary() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(store.clone());
        persistence.save(&sample_state()).unwrap();

        let raw = store.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        json["recipes"]["recipes"][0]["ingredients"] = serde_json::json!("not a list");
        store
            .set_item(DEFAULT_STORAGE_KEY, &json.to_string())
            .unwrap();

        let loaded = persistence.load().unwrap();
        assert!(loaded.recipes().is_none());
        assert_eq!(loaded.diary(), Some(&sample_state().diary));
    }

    #[test]
    fn test_null_numbers_read_as_zero() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(store.clone());
        persistence.save(&sample_state()).unwrap();

        let raw = store.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        json["recipes"]["recipes"][0]["calories"] = serde_json::Value::Null;
        store
            .set_item(DEFAULT_STORAGE_KEY, &json.to_string())
            .unwrap();

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded.recipes().unwrap()[0].calories, 0.0);
        assert_eq!(loaded.diary().unwrap().entries.len(), 2);
    }

    #[test]
    fn test_slices_are_optional() {
        let store = MemoryStore::new();
        store
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"{"diary": {"entries": [], "goals": {"dailyCalories": 1500, "dailyProtein": 90, "dailyFat": 50, "dailyCarbs": 180}}}"#,
            )
            .unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load().unwrap();
        assert_eq!(loaded.diary().unwrap().goals.daily_calories, 1500.0);
        assert!(loaded.recipes().is_none());
    }

    #[test]
    fn test_null_recipes_are_absent() {
        let store = MemoryStore::new();
        store
            .set_item(DEFAULT_STORAGE_KEY, r#"{"recipes": {"recipes": null}}"#)
            .unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load().unwrap();
        assert!(loaded.recipes().is_none());
        assert!(loaded.diary().is_none());
    }

    #[test]
    fn test_save_quota_exceeded_is_reported() {
        let persistence = Persistence::new(MemoryStore::with_quota(16));

        let err = persistence.save(&sample_state()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Write(StorageError::QuotaExceeded { .. })
        ));
        assert!(persistence.load().is_none());
    }

    #[test]
    fn test_clear_removes_blob() {
        let persistence = Persistence::new(MemoryStore::new());
        persistence.save(&sample_state()).unwrap();

        persistence.clear().unwrap();
        assert!(persistence.load().is_none());

        // Clearing twice is fine
        persistence.clear().unwrap();
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let persistence = Persistence::with_key(store.clone(), "other_key");
        persistence.save(&AppState::default()).unwrap();

        assert_eq!(persistence.key(), "other_key");
        assert!(store.get_item("other_key").unwrap().is_some());
        assert!(store.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
