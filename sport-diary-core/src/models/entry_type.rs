use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Meal,
    Exercise,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Meal => write!(f, "meal"),
            EntryType::Exercise => write!(f, "exercise"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meal" => Ok(EntryType::Meal),
            "exercise" => Ok(EntryType::Exercise),
            _ => Err(format!(
                "Invalid entry type '{}'. Valid options: meal, exercise",
                s
            )),
        }
    }
}
