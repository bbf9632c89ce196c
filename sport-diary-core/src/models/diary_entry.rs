use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::entry_type::EntryType;
use super::recipe::Recipe;

/// Returns a fresh identifier for a diary entry or recipe.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// A logged meal or exercise session.
///
/// `created_at` is owned by the store: it is stamped when the entry is added
/// and carried over unchanged on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub name: String,
    pub datetime: DateTime<Utc>,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    /// Minutes, for exercise entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(entry_type: EntryType, name: impl Into<String>, calories: f64) -> Self {
        let now = Utc::now();
        Self {
            id: new_entry_id(),
            entry_type,
            name: name.into(),
            datetime: now,
            calories,
            protein: None,
            fat: None,
            carbs: None,
            duration: None,
            notes: None,
            image_url: None,
            created_at: now,
        }
    }

    pub fn meal(name: impl Into<String>, calories: f64) -> Self {
        Self::new(EntryType::Meal, name, calories)
    }

    pub fn exercise(name: impl Into<String>, calories: f64) -> Self {
        Self::new(EntryType::Exercise, name, calories)
    }

    /// Entry for a dish cooked from a catalog recipe.
    pub fn from_recipe(recipe: &Recipe, now: DateTime<Utc>) -> Self {
        Self {
            id: new_entry_id(),
            entry_type: EntryType::Meal,
            name: recipe.title.clone(),
            datetime: now,
            calories: recipe.calories,
            protein: Some(recipe.protein),
            fat: Some(recipe.fat),
            carbs: Some(recipe.carbs),
            duration: None,
            notes: Some(format!("Cooked from recipe \"{}\"", recipe.title)),
            image_url: Some(recipe.image_url.clone()),
            created_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = datetime;
        self
    }

    pub fn with_macros(mut self, protein: f64, fat: f64, carbs: f64) -> Self {
        self.protein = Some(protein);
        self.fat = Some(fat);
        self.carbs = Some(carbs);
        self
    }

    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn is_meal(&self) -> bool {
        self.entry_type == EntryType::Meal
    }
}

impl fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.entry_type)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "When: {}", self.datetime.to_rfc3339())?;
        writeln!(f, "Calories: {} kcal", self.calories)?;

        if self.is_meal() {
            let macros: Vec<String> = [
                self.protein.map(|p| format!("protein: {} g", p)),
                self.fat.map(|v| format!("fat: {} g", v)),
                self.carbs.map(|c| format!("carbs: {} g", c)),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !macros.is_empty() {
                writeln!(f, "Macros: {}", macros.join(", "))?;
            }
        }

        if let Some(duration) = self.duration {
            writeln!(f, "Duration: {} min", duration)?;
        }

        if let Some(notes) = &self.notes {
            writeln!(f, "\nNotes: {}", notes)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_meal_new() {
        let entry = DiaryEntry::meal("Salad", 250.0);
        assert_eq!(entry.entry_type, EntryType::Meal);
        assert_eq!(entry.name, "Salad");
        assert_eq!(entry.calories, 250.0);
        assert!(entry.protein.is_none());
        assert!(entry.notes.is_none());
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_entry_id(), new_entry_id());
    }

    #[test]
    fn test_exercise_with_duration() {
        let entry = DiaryEntry::exercise("Running", 400.0).with_duration(45.0);
        assert!(!entry.is_meal());
        assert_eq!(entry.duration, Some(45.0));
    }

    #[test]
    fn test_from_recipe() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let recipe = Recipe::new("r1", "Greek salad", "https://img/salad")
            .with_nutrition(250.0, 8.0, 20.0, 10.0);

        let entry = DiaryEntry::from_recipe(&recipe, now);
        assert_eq!(entry.entry_type, EntryType::Meal);
        assert_eq!(entry.name, "Greek salad");
        assert_eq!(entry.calories, 250.0);
        assert_eq!(entry.protein, Some(8.0));
        assert_eq!(entry.fat, Some(20.0));
        assert_eq!(entry.carbs, Some(10.0));
        assert_eq!(entry.image_url.as_deref(), Some("https://img/salad"));
        assert_eq!(
            entry.notes.as_deref(),
            Some("Cooked from recipe \"Greek salad\"")
        );
        assert_eq!(entry.datetime, now);
        assert_eq!(entry.created_at, now);
    }

    #[test]
    fn test_json_field_names() {
        let entry = DiaryEntry::meal("Oats", 300.0)
            .with_id("1")
            .with_image_url("data:image/png;base64,AAAA");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["type"], "meal");
        assert_eq!(json["imageUrl"], "data:image/png;base64,AAAA");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("protein").is_none());
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_parses_browser_timestamps() {
        let json = r#"{
            "id": "1",
            "type": "meal",
            "name": "Salad",
            "datetime": "2024-01-01T12:00:00.000Z",
            "calories": 250,
            "createdAt": "2024-01-01T12:00:05.123Z"
        }"#;
        let entry: DiaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.datetime,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(entry.calories, 250.0);
        assert!(entry.duration.is_none());
    }

    #[test]
    fn test_display() {
        let entry = DiaryEntry::meal("Salad", 250.0)
            .with_macros(8.0, 20.0, 10.0)
            .with_notes("Lunch at work");
        let output = format!("{}", entry);
        assert!(output.contains("Salad (meal)"));
        assert!(output.contains("Calories: 250 kcal"));
        assert!(output.contains("protein: 8 g"));
        assert!(output.contains("Lunch at work"));
    }
}
