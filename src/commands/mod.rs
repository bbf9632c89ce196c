mod config_cmd;
mod diary;
mod goals;
mod recipe;

pub use config_cmd::ConfigCommand;
pub use diary::DiaryCommand;
pub use goals::GoalsCommand;
pub use recipe::RecipeCommand;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::ValueEnum;
use sport_diary_core::{AppStore, FileStore};
use std::io::{self, Write};

/// The store as wired up by the CLI.
pub type Store = AppStore<FileStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a user-supplied instant.
///
/// Accepts RFC 3339, or a local `YYYY-MM-DD HH:MM` / `YYYY-MM-DD`.
pub(crate) fn parse_datetime(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            format!(
                "Invalid date '{}'. Use RFC 3339, 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD'.",
                input
            )
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in the local time zone", input))
}

/// The parsed `--at` value, or the current instant.
pub(crate) fn at_or_now(at: &Option<String>) -> Result<DateTime<Utc>, String> {
    match at {
        Some(at) => parse_datetime(at),
        None => Ok(Utc::now()),
    }
}

pub(crate) fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(format!("{} must be a non-negative number", field))
        }
        _ => Ok(()),
    }
}

/// Asks a y/N question on stdin.
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
