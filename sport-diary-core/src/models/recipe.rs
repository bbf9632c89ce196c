use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog recipe. Nutrition values are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub calories: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub protein: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub fat: f64,
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub carbs: f64,
    /// Minutes
    #[serde(default, deserialize_with = "super::number::null_as_zero")]
    pub time: f64,
}

impl Recipe {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            time: 0.0,
        }
    }

    pub fn with_ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions<I, T>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_nutrition(mut self, calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.fat = fat;
        self.carbs = carbs;
        self
    }

    pub fn with_time(mut self, minutes: f64) -> Self {
        self.time = minutes;
        self
    }
}

/// Splits free-form text into trimmed, non-empty lines.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f, "Time: {} min", self.time)?;
        writeln!(
            f,
            "Nutrition: {} kcal, protein: {} g, fat: {} g, carbs: {} g",
            self.calories, self.protein, self.fat, self.carbs
        )?;

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (step, instruction) in self.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", step + 1, instruction)?;
            }
        }

        Ok(())
    }
}
