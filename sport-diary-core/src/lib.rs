//! Sport Diary Core Library
//!
//! State store, persistence and derived views for the Sport Diary app.

pub mod models;
pub mod storage;
pub mod store;
pub mod views;

pub use models::{new_entry_id, parse_lines, DiaryEntry, DiaryGoals, EntryType, Recipe};
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, PersistedState, Persistence, PersistenceError,
    StorageError, DEFAULT_STORAGE_KEY,
};
pub use store::{
    default_recipes, Action, AppState, AppStore, Clock, DiaryState, FixedClock, RecipesState,
    SubscriptionId, SystemClock,
};
pub use views::{
    filter_entries, find_recipes, EntryTypeFilter, GoalProgress, NutritionTotals, TimeFilter,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
