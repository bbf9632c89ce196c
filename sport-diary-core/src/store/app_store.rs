use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::clock::{Clock, SystemClock};
use super::diary::DiaryState;
use super::recipes::RecipesState;
use crate::models::{DiaryEntry, DiaryGoals, Recipe};
use crate::storage::{KeyValueStore, PersistedState, Persistence, PersistenceError};

/// The combined application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub diary: DiaryState,
    pub recipes: RecipesState,
}

impl AppState {
    /// Builds the state from a persisted blob, one slice at a time. Each
    /// slice missing from the blob falls back to its defaults.
    pub fn hydrate(persisted: Option<PersistedState>) -> Self {
        let PersistedState { diary, recipes } = persisted.unwrap_or_default();

        let diary = diary.unwrap_or_default();
        let recipes = recipes
            .and_then(|r| r.recipes)
            .map(|recipes| RecipesState { recipes })
            .unwrap_or_default();

        Self { diary, recipes }
    }

    /// Applies an action to the slice that owns it. Returns false when the
    /// action referenced an id that does not exist.
    pub fn apply(&mut self, action: Action, now: DateTime<Utc>) -> bool {
        match action {
            Action::AddDiaryEntry(entry) => {
                self.diary.add_entry(entry, now);
                true
            }
            Action::UpdateDiaryEntry(entry) => self.diary.update_entry(entry),
            Action::DeleteDiaryEntry(id) => self.diary.delete_entry(&id),
            Action::UpdateGoals(goals) => {
                self.diary.set_goals(goals);
                true
            }
            Action::AddRecipe(recipe) => {
                self.recipes.add_recipe(recipe);
                true
            }
            Action::UpdateRecipe(recipe) => self.recipes.update_recipe(recipe),
            Action::DeleteRecipe(id) => self.recipes.delete_recipe(&id),
            Action::ResetRecipes => {
                self.recipes.reset();
                true
            }
        }
    }
}

/// Handle returned by [`AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

/// Owns the application state and keeps storage in step with it.
///
/// Construct one at startup with [`AppStore::open`] and pass it by reference
/// to whatever reads or writes state.
pub struct AppStore<S> {
    state: AppState,
    persistence: Persistence<S>,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<PersistenceError>,
}

impl<S: KeyValueStore> AppStore<S> {
    /// Hydrates the state from storage, using defaults for anything absent
    /// or unreadable.
    pub fn open(persistence: Persistence<S>) -> Self {
        let persisted = persistence.load();
        match &persisted {
            Some(p) => tracing::debug!(
                "Hydrating from '{}' (diary: {}, recipes: {})",
                persistence.key(),
                p.diary().is_some(),
                p.recipes().is_some()
            ),
            None => tracing::debug!("No state under '{}', using defaults", persistence.key()),
        }

        Self {
            state: AppState::hydrate(persisted),
            persistence,
            clock: Box::new(SystemClock),
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Applies the action, then commits.
    ///
    /// Commit writes the complete state to storage, except for
    /// [`Action::ResetRecipes`], which removes the stored blob instead. A
    /// failed write is logged and kept in [`last_persist_error`]; the
    /// in-memory state stays authoritative. Subscribers run after every
    /// dispatch, including no-ops.
    ///
    /// [`last_persist_error`]: Self::last_persist_error
    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let clears_storage = action.clears_storage();

        if !self.state.apply(action, self.clock.now()) {
            tracing::debug!("{}: no matching id, state unchanged", name);
        }

        if clears_storage {
            tracing::info!("{}: clearing stored state under '{}'", name, self.persistence.key());
            self.record(self.persistence.clear(), name);
        } else {
            self.record(self.persistence.save(&self.state), name);
        }

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    fn record(&mut self, result: Result<(), PersistenceError>, action: &str) {
        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!("{}: state not persisted: {}", action, e);
                self.last_persist_error = Some(e);
            }
        }
    }

    pub fn add_diary_entry(&mut self, entry: DiaryEntry) {
        self.dispatch(Action::AddDiaryEntry(entry));
    }

    pub fn update_diary_entry(&mut self, entry: DiaryEntry) {
        self.dispatch(Action::UpdateDiaryEntry(entry));
    }

    pub fn delete_diary_entry(&mut self, id: impl Into<String>) {
        self.dispatch(Action::DeleteDiaryEntry(id.into()));
    }

    pub fn update_goals(&mut self, goals: DiaryGoals) {
        self.dispatch(Action::UpdateGoals(goals));
    }

    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.dispatch(Action::AddRecipe(recipe));
    }

    pub fn update_recipe(&mut self, recipe: Recipe) {
        self.dispatch(Action::UpdateRecipe(recipe));
    }

    pub fn delete_recipe(&mut self, id: impl Into<String>) {
        self.dispatch(Action::DeleteRecipe(id.into()));
    }

    pub fn reset_recipes(&mut self) {
        self.dispatch(Action::ResetRecipes);
    }

    /// Registers a listener called synchronously after every commit.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.state.diary.entries
    }

    pub fn goals(&self) -> &DiaryGoals {
        &self.state.diary.goals
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.state.recipes.recipes
    }

    pub fn entry(&self, id: &str) -> Option<&DiaryEntry> {
        self.state.diary.entry(id)
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.state.recipes.recipe(id)
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// The error from the most recent commit, if it failed.
    pub fn last_persist_error(&self) -> Option<&PersistenceError> {
        self.last_persist_error.as_ref()
    }
}
