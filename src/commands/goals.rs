use clap::{Args, Subcommand};
use sport_diary_core::DiaryGoals;

use super::{check_non_negative, OutputFormat, Store};

#[derive(Args)]
pub struct GoalsCommand {
    #[command(subcommand)]
    pub command: GoalsSubcommand,
}

#[derive(Subcommand)]
pub enum GoalsSubcommand {
    /// Show the daily goals
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change one or more daily goals
    Set {
        /// Daily calories (kcal)
        #[arg(long)]
        calories: Option<f64>,

        /// Daily protein (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Daily fat (g)
        #[arg(long)]
        fat: Option<f64>,

        /// Daily carbohydrates (g)
        #[arg(long)]
        carbs: Option<f64>,
    },
}

impl GoalsCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalsSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(store.goals())?);
                    }
                    OutputFormat::Text => {
                        println!("{}", store.goals());
                    }
                }
                Ok(())
            }

            GoalsSubcommand::Set {
                calories,
                protein,
                fat,
                carbs,
            } => {
                if calories.is_none() && protein.is_none() && fat.is_none() && carbs.is_none() {
                    return Err("Nothing to update. Provide at least one goal.".into());
                }
                check_non_negative("Calories", *calories)?;
                check_non_negative("Protein", *protein)?;
                check_non_negative("Fat", *fat)?;
                check_non_negative("Carbs", *carbs)?;

                let current = *store.goals();
                let goals = DiaryGoals::new(
                    calories.unwrap_or(current.daily_calories),
                    protein.unwrap_or(current.daily_protein),
                    fat.unwrap_or(current.daily_fat),
                    carbs.unwrap_or(current.daily_carbs),
                );
                store.update_goals(goals);

                println!("Updated goals:");
                println!("{}", store.goals());
                Ok(())
            }
        }
    }
}
