//! The application state container.
//!
//! State is split into two independently owned slices:
//! - [`DiaryState`]: diary entries and daily goals
//! - [`RecipesState`]: the recipe catalog
//!
//! All writes go through [`AppStore::dispatch`], which applies an [`Action`]
//! to its slice, then commits: the full state is written to storage and
//! subscribers are notified.

mod action;
mod app_store;
mod clock;
mod diary;
mod recipes;

pub use action::Action;
pub use app_store::{AppState, AppStore, SubscriptionId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use diary::DiaryState;
pub use recipes::{default_recipes, RecipesState};
