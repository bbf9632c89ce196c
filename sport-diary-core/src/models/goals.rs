use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily nutrition targets. One per application state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryGoals {
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub daily_calories: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub daily_protein: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub daily_fat: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub daily_carbs: f64,
}

impl DiaryGoals {
    pub fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            daily_calories: calories,
            daily_protein: protein,
            daily_fat: fat,
            daily_carbs: carbs,
        }
    }
}

impl Default for DiaryGoals {
    fn default() -> Self {
        Self::new(2000.0, 100.0, 70.0, 250.0)
    }
}

impl fmt::Display for DiaryGoals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily goals")?;
        writeln!(f, "{}", "=".repeat(11))?;
        writeln!(f, "Calories: {} kcal", self.daily_calories)?;
        writeln!(f, "Protein:  {} g", self.daily_protein)?;
        writeln!(f, "Fat:      {} g", self.daily_fat)?;
        write!(f, "Carbs:    {} g", self.daily_carbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goals() {
        let goals = DiaryGoals::default();
        assert_eq!(goals.daily_calories, 2000.0);
        assert_eq!(goals.daily_protein, 100.0);
        assert_eq!(goals.daily_fat, 70.0);
        assert_eq!(goals.daily_carbs, 250.0);
    }

    #[test]
    fn test_goals_json_field_names() {
        let json = serde_json::to_value(DiaryGoals::default()).unwrap();
        assert_eq!(json["dailyCalories"], 2000.0);
        assert_eq!(json["dailyProtein"], 100.0);
        assert_eq!(json["dailyFat"], 70.0);
        assert_eq!(json["dailyCarbs"], 250.0);
    }

    #[test]
    fn test_goals_display() {
        let output = format!("{}", DiaryGoals::new(1800.0, 120.0, 60.0, 200.0));
        assert!(output.contains("Calories: 1800 kcal"));
        assert!(output.contains("Protein:  120 g"));
    }
}
