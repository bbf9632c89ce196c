//! Read-side helpers: filtering and totals over state snapshots.
//!
//! Nothing here mutates state. Time filters are evaluated in the time zone
//! of the `now` argument, so callers pass `Local::now()` to get calendar
//! days as the user sees them.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::{DiaryEntry, DiaryGoals, EntryType, Recipe};

/// Calendar window an entry's `datetime` must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    Today,
    /// Since the start of the current week (weeks start on Sunday).
    Week,
    Month,
    All,
}

impl TimeFilter {
    /// Start of the window containing `now`, as a wall-clock time in
    /// `now`'s zone. `None` for [`TimeFilter::All`].
    pub fn window_start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<NaiveDateTime> {
        let today = now.date_naive();
        let start = match self {
            TimeFilter::Today => today,
            TimeFilter::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
            }
            TimeFilter::Month => today.with_day(1)?,
            TimeFilter::All => return None,
        };
        start.and_hms_opt(0, 0, 0)
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(TimeFilter::Today),
            "week" => Ok(TimeFilter::Week),
            "month" => Ok(TimeFilter::Month),
            "all" => Ok(TimeFilter::All),
            _ => Err(format!(
                "Invalid period '{}'. Valid options: today, week, month, all",
                s
            )),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Today => write!(f, "today"),
            TimeFilter::Week => write!(f, "week"),
            TimeFilter::Month => write!(f, "month"),
            TimeFilter::All => write!(f, "all"),
        }
    }
}

/// Which kinds of entries to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryTypeFilter {
    #[default]
    All,
    Only(EntryType),
}

impl EntryTypeFilter {
    pub fn matches(&self, entry: &DiaryEntry) -> bool {
        match self {
            EntryTypeFilter::All => true,
            EntryTypeFilter::Only(kind) => entry.entry_type == *kind,
        }
    }
}

impl FromStr for EntryTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(EntryTypeFilter::All);
        }
        s.parse::<EntryType>()
            .map(EntryTypeFilter::Only)
            .map_err(|_| format!("Invalid type '{}'. Valid options: all, meal, exercise", s))
    }
}

/// Entries matching both filters, newest first by `created_at`.
pub fn filter_entries<Tz: TimeZone>(
    entries: &[DiaryEntry],
    time: TimeFilter,
    kind: EntryTypeFilter,
    now: &DateTime<Tz>,
) -> Vec<DiaryEntry> {
    let zone = now.timezone();
    let start = time.window_start(now);

    let mut filtered: Vec<DiaryEntry> = entries
        .iter()
        .filter(|e| kind.matches(e))
        .filter(|e| match start {
            Some(start) => e.datetime.with_timezone(&zone).naive_local() >= start,
            None => true,
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

/// Case-insensitive title search. An empty query matches everything.
pub fn find_recipes<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.trim().to_lowercase();
    recipes
        .iter()
        .filter(|r| query.is_empty() || r.title.to_lowercase().contains(&query))
        .collect()
}

/// Summed calories and macros over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutritionTotals {
    /// Absent macros count as zero. Exercise calories are added like any
    /// other entry's.
    pub fn sum<'a>(entries: impl IntoIterator<Item = &'a DiaryEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |acc, e| Self {
            calories: acc.calories + e.calories,
            protein: acc.protein + e.protein.unwrap_or(0.0),
            fat: acc.fat + e.fat.unwrap_or(0.0),
            carbs: acc.carbs + e.carbs.unwrap_or(0.0),
        })
    }
}

/// Percent of each daily goal reached, 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl GoalProgress {
    pub fn new(totals: &NutritionTotals, goals: &DiaryGoals) -> Self {
        Self {
            calories: percent(totals.calories, goals.daily_calories),
            protein: percent(totals.protein, goals.daily_protein),
            fat: percent(totals.fat, goals.daily_fat),
            carbs: percent(totals.carbs, goals.daily_carbs),
        }
    }
}

// A zero goal behaves like a goal of 1.
fn percent(value: f64, goal: f64) -> f64 {
    let goal = if goal > 0.0 { goal } else { 1.0 };
    let value = value.clamp(0.0, goal);
    value / goal.max(1.0) * 100.0
}
