use chrono::Local;
use clap::{Args, Subcommand};
use sport_diary_core::{
    filter_entries, DiaryEntry, EntryType, EntryTypeFilter, GoalProgress, NutritionTotals,
    TimeFilter,
};

use super::{
    at_or_now, check_non_negative, confirm, parse_datetime, truncate, OutputFormat, Store,
};

#[derive(Args)]
pub struct DiaryCommand {
    #[command(subcommand)]
    pub command: DiarySubcommand,
}

#[derive(Subcommand)]
pub enum DiarySubcommand {
    /// Log a meal or an exercise session
    Add {
        /// What was eaten or done
        name: String,

        /// Entry type (meal, exercise)
        #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "meal")]
        entry_type: String,

        /// Calories eaten (meal) or burned (exercise)
        #[arg(long)]
        calories: f64,

        /// Protein in grams (meals only)
        #[arg(long)]
        protein: Option<f64>,

        /// Fat in grams (meals only)
        #[arg(long)]
        fat: Option<f64>,

        /// Carbohydrates in grams (meals only)
        #[arg(long)]
        carbs: Option<f64>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Image URL or data URI
        #[arg(long)]
        image_url: Option<String>,

        /// When it happened (RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD"); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// List entries with totals against the daily goals
    List {
        /// Period (today, week, month, all)
        #[arg(long, short, default_value = "today")]
        period: String,

        /// Entry type (all, meal, exercise)
        #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "all")]
        entry_type: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show an entry's details
    Show {
        /// Entry ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing entry
    Update {
        /// Entry ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New entry type (meal, exercise)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        entry_type: Option<String>,

        /// Calories
        #[arg(long)]
        calories: Option<f64>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<f64>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,

        /// Image URL or data URI
        #[arg(long)]
        image_url: Option<String>,

        /// When it happened
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl DiaryCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DiarySubcommand::Add {
                name,
                entry_type,
                calories,
                protein,
                fat,
                carbs,
                duration,
                notes,
                image_url,
                at,
            } => {
                if name.trim().is_empty() {
                    return Err("Entry name cannot be empty".into());
                }
                let entry_type: EntryType = entry_type.parse()?;
                check_non_negative("Calories", Some(*calories))?;
                check_non_negative("Protein", *protein)?;
                check_non_negative("Fat", *fat)?;
                check_non_negative("Carbs", *carbs)?;
                check_non_negative("Duration", *duration)?;

                check_macros_allowed(entry_type, *protein, *fat, *carbs)?;

                let mut entry = DiaryEntry::new(entry_type, name.trim(), *calories);
                entry.protein = *protein;
                entry.fat = *fat;
                entry.carbs = *carbs;
                entry.duration = *duration;
                entry.notes = notes.clone();
                entry.image_url = image_url.clone();
                entry = entry.with_datetime(at_or_now(at)?);

                let id = entry.id.clone();
                store.add_diary_entry(entry);

                if let Some(added) = store.entry(&id) {
                    println!("Added diary entry:");
                    println!("{}", added);
                }
                Ok(())
            }

            DiarySubcommand::List {
                period,
                entry_type,
                format,
            } => {
                let period: TimeFilter = period.parse()?;
                let kind: EntryTypeFilter = entry_type.parse()?;

                let entries = filter_entries(store.entries(), period, kind, &Local::now());
                let totals = NutritionTotals::sum(&entries);
                let progress = GoalProgress::new(&totals, store.goals());

                match format {
                    OutputFormat::Json => {
                        let report = serde_json::json!({
                            "period": period.to_string(),
                            "entries": entries,
                            "totals": totals,
                            "goals": store.goals(),
                            "progress": progress,
                        });
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No diary entries for {}", period);
                        } else {
                            println!(
                                "{:<36}  {:<16}  {:<8}  {:>7}  NAME",
                                "ID", "WHEN", "TYPE", "KCAL"
                            );
                            println!("{}", "-".repeat(100));
                            for entry in &entries {
                                println!(
                                    "{:<36}  {:<16}  {:<8}  {:>7}  {}",
                                    entry.id,
                                    entry
                                        .datetime
                                        .with_timezone(&Local)
                                        .format("%Y-%m-%d %H:%M")
                                        .to_string(),
                                    entry.entry_type,
                                    entry.calories,
                                    truncate(&entry.name, 30)
                                );
                            }
                            println!("\nTotal: {} entr(ies)", entries.len());
                        }

                        let goals = store.goals();
                        println!();
                        println!("Totals for {}:", period);
                        println!(
                            "  Calories: {} / {} kcal ({:.0}%)",
                            totals.calories, goals.daily_calories, progress.calories
                        );
                        println!(
                            "  Protein:  {} / {} g ({:.0}%)",
                            totals.protein, goals.daily_protein, progress.protein
                        );
                        println!(
                            "  Fat:      {} / {} g ({:.0}%)",
                            totals.fat, goals.daily_fat, progress.fat
                        );
                        println!(
                            "  Carbs:    {} / {} g ({:.0}%)",
                            totals.carbs, goals.daily_carbs, progress.carbs
                        );
                    }
                }
                Ok(())
            }

            DiarySubcommand::Show { id, format } => {
                let entry = store
                    .entry(id)
                    .ok_or_else(|| format!("Diary entry not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(entry)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", entry);
                        println!("Logged at: {}", entry.created_at.to_rfc3339());
                    }
                }
                Ok(())
            }

            DiarySubcommand::Update {
                id,
                name,
                entry_type,
                calories,
                protein,
                fat,
                carbs,
                duration,
                notes,
                image_url,
                at,
            } => {
                let has_updates = name.is_some()
                    || entry_type.is_some()
                    || calories.is_some()
                    || protein.is_some()
                    || fat.is_some()
                    || carbs.is_some()
                    || duration.is_some()
                    || notes.is_some()
                    || image_url.is_some()
                    || at.is_some();

                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut entry = store
                    .entry(id)
                    .cloned()
                    .ok_or_else(|| format!("Diary entry not found: {}", id))?;

                check_non_negative("Calories", *calories)?;
                check_non_negative("Protein", *protein)?;
                check_non_negative("Fat", *fat)?;
                check_non_negative("Carbs", *carbs)?;
                check_non_negative("Duration", *duration)?;

                if let Some(new_name) = name {
                    if new_name.trim().is_empty() {
                        return Err("Entry name cannot be empty".into());
                    }
                    entry.name = new_name.trim().to_string();
                }
                if let Some(new_type) = entry_type {
                    entry.entry_type = new_type.parse()?;
                }
                check_macros_allowed(entry.entry_type, *protein, *fat, *carbs)?;
                if let Some(v) = calories {
                    entry.calories = *v;
                }
                if protein.is_some() {
                    entry.protein = *protein;
                }
                if fat.is_some() {
                    entry.fat = *fat;
                }
                if carbs.is_some() {
                    entry.carbs = *carbs;
                }
                if duration.is_some() {
                    entry.duration = *duration;
                }
                if notes.is_some() {
                    entry.notes = notes.clone();
                }
                if image_url.is_some() {
                    entry.image_url = image_url.clone();
                }
                if let Some(at) = at {
                    entry.datetime = parse_datetime(at)?;
                }

                // Macros are meaningless once an entry becomes an exercise
                if entry.entry_type == EntryType::Exercise {
                    entry.protein = None;
                    entry.fat = None;
                    entry.carbs = None;
                }

                store.update_diary_entry(entry);

                if let Some(updated) = store.entry(id) {
                    println!("Updated diary entry:");
                    println!("{}", updated);
                }
                Ok(())
            }

            DiarySubcommand::Delete { id, force } => {
                let name = store
                    .entry(id)
                    .map(|e| e.name.clone())
                    .ok_or_else(|| format!("Diary entry not found: {}", id))?;

                if !force && !confirm(&format!("Delete diary entry '{}'?", name))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete_diary_entry(id.as_str());
                println!("Deleted diary entry: {}", name);
                Ok(())
            }
        }
    }
}

fn check_macros_allowed(
    entry_type: EntryType,
    protein: Option<f64>,
    fat: Option<f64>,
    carbs: Option<f64>,
) -> Result<(), String> {
    let has_macros = protein.is_some() || fat.is_some() || carbs.is_some();
    if entry_type == EntryType::Exercise && has_macros {
        return Err("Protein, fat and carbs only apply to meal entries".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_rejected_for_exercise() {
        let err = check_macros_allowed(EntryType::Exercise, Some(5.0), None, None).unwrap_err();
        assert!(err.contains("only apply to meal entries"));
        assert!(check_macros_allowed(EntryType::Exercise, None, None, Some(1.0)).is_err());
    }

    #[test]
    fn test_macros_allowed_for_meal_or_when_absent() {
        assert!(check_macros_allowed(EntryType::Meal, Some(5.0), Some(2.0), Some(30.0)).is_ok());
        assert!(check_macros_allowed(EntryType::Exercise, None, None, None).is_ok());
    }
}
