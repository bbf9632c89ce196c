//! Diary slice: logged entries and the daily goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DiaryEntry, DiaryGoals};

/// Diary entries in insertion order, plus the goals singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryState {
    #[serde(default)]
    pub entries: Vec<DiaryEntry>,
    #[serde(default)]
    pub goals: DiaryGoals,
}

impl DiaryState {
    /// Appends the entry, stamping `created_at` with `now` whatever the
    /// caller supplied.
    pub fn add_entry(&mut self, mut entry: DiaryEntry, now: DateTime<Utc>) {
        entry.created_at = now;
        self.entries.push(entry);
    }

    /// Replaces the entry with the same id, keeping its original
    /// `created_at`. Returns false (and changes nothing) for an unknown id.
    pub fn update_entry(&mut self, mut entry: DiaryEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                entry.created_at = existing.created_at;
                *existing = entry;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with `id`. Returns false if there was none.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn set_goals(&mut self, goals: DiaryGoals) {
        self.goals = goals;
    }

    pub fn entry(&self, id: &str) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
