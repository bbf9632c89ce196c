use clap::{Args, Subcommand};
use sport_diary_core::{find_recipes, new_entry_id, parse_lines, DiaryEntry, Recipe};

use super::{at_or_now, check_non_negative, confirm, truncate, OutputFormat, Store};

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes
    List {
        /// Only recipes whose title contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a recipe to the catalog
    Add {
        /// Recipe title
        title: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Ingredient (can be repeated; multi-line values are split per line)
        #[arg(long = "ingredient", value_name = "INGREDIENT")]
        ingredients: Vec<String>,

        /// Instruction step (can be repeated; multi-line values are split per line)
        #[arg(long = "step", value_name = "STEP")]
        steps: Vec<String>,

        /// Calories per serving
        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        /// Protein per serving (g)
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Fat per serving (g)
        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Carbohydrates per serving (g)
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Cooking time in minutes
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },

    /// Update an existing recipe
    Update {
        /// Recipe ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Replace the ingredient list (can be repeated)
        #[arg(long = "ingredient", value_name = "INGREDIENT")]
        ingredients: Vec<String>,

        /// Replace the instruction steps (can be repeated)
        #[arg(long = "step", value_name = "STEP")]
        steps: Vec<String>,

        /// Calories per serving
        #[arg(long)]
        calories: Option<f64>,

        /// Protein per serving (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Fat per serving (g)
        #[arg(long)]
        fat: Option<f64>,

        /// Carbohydrates per serving (g)
        #[arg(long)]
        carbs: Option<f64>,

        /// Cooking time in minutes
        #[arg(long)]
        time: Option<f64>,
    },

    /// Delete a recipe
    Delete {
        /// Recipe ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Restore the built-in recipes (also wipes the saved diary)
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Log a recipe as an eaten meal
    Cook {
        /// Recipe ID
        id: String,

        /// When it was eaten; defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

fn lines(values: &[String]) -> Vec<String> {
    values.iter().flat_map(|v| parse_lines(v)).collect()
}

impl RecipeCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::List { search, format } => {
                let recipes = find_recipes(store.recipes(), search.as_deref().unwrap_or(""));

                if recipes.is_empty() {
                    println!("No recipes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<32}  {:>6}  {:>6}", "ID", "TITLE", "KCAL", "MIN");
                        println!("{}", "-".repeat(86));
                        for recipe in &recipes {
                            println!(
                                "{:<36}  {:<32}  {:>6}  {:>6}",
                                recipe.id,
                                truncate(&recipe.title, 32),
                                recipe.calories,
                                recipe.time
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { id, format } => {
                let recipe = store
                    .recipe(id)
                    .ok_or_else(|| format!("Recipe not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", recipe);
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Add {
                title,
                image_url,
                ingredients,
                steps,
                calories,
                protein,
                fat,
                carbs,
                time,
            } => {
                if title.trim().is_empty() {
                    return Err("Recipe title cannot be empty".into());
                }
                let ingredients = lines(ingredients);
                if ingredients.is_empty() {
                    return Err("A recipe needs at least one --ingredient".into());
                }
                for (field, value) in [
                    ("Calories", calories),
                    ("Protein", protein),
                    ("Fat", fat),
                    ("Carbs", carbs),
                    ("Time", time),
                ] {
                    check_non_negative(field, Some(*value))?;
                }

                let recipe = Recipe::new(new_entry_id(), title.trim(), image_url.as_str())
                    .with_ingredients(ingredients)
                    .with_instructions(lines(steps))
                    .with_nutrition(*calories, *protein, *fat, *carbs)
                    .with_time(*time);

                println!("Added recipe:");
                println!("{}", recipe);
                println!("ID: {}", recipe.id);
                store.add_recipe(recipe);
                Ok(())
            }

            RecipeSubcommand::Update {
                id,
                title,
                image_url,
                ingredients,
                steps,
                calories,
                protein,
                fat,
                carbs,
                time,
            } => {
                let has_updates = title.is_some()
                    || image_url.is_some()
                    || !ingredients.is_empty()
                    || !steps.is_empty()
                    || calories.is_some()
                    || protein.is_some()
                    || fat.is_some()
                    || carbs.is_some()
                    || time.is_some();

                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut recipe = store
                    .recipe(id)
                    .cloned()
                    .ok_or_else(|| format!("Recipe not found: {}", id))?;

                for (field, value) in [
                    ("Calories", calories),
                    ("Protein", protein),
                    ("Fat", fat),
                    ("Carbs", carbs),
                    ("Time", time),
                ] {
                    check_non_negative(field, *value)?;
                }

                if let Some(new_title) = title {
                    if new_title.trim().is_empty() {
                        return Err("Recipe title cannot be empty".into());
                    }
                    recipe.title = new_title.trim().to_string();
                }
                if let Some(url) = image_url {
                    recipe.image_url = url.clone();
                }
                if !ingredients.is_empty() {
                    recipe.ingredients = lines(ingredients);
                }
                if !steps.is_empty() {
                    recipe.instructions = lines(steps);
                }
                if let Some(v) = calories {
                    recipe.calories = *v;
                }
                if let Some(v) = protein {
                    recipe.protein = *v;
                }
                if let Some(v) = fat {
                    recipe.fat = *v;
                }
                if let Some(v) = carbs {
                    recipe.carbs = *v;
                }
                if let Some(v) = time {
                    recipe.time = *v;
                }

                store.update_recipe(recipe);

                if let Some(updated) = store.recipe(id) {
                    println!("Updated recipe:");
                    println!("{}", updated);
                }
                Ok(())
            }

            RecipeSubcommand::Delete { id, force } => {
                let title = store
                    .recipe(id)
                    .map(|r| r.title.clone())
                    .ok_or_else(|| format!("Recipe not found: {}", id))?;

                if !force && !confirm(&format!("Delete recipe '{}'?", title))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete_recipe(id.as_str());
                println!("Deleted recipe: {}", title);
                Ok(())
            }

            RecipeSubcommand::Reset { force } => {
                if !force
                    && !confirm("Restore the built-in recipes? Saved diary data is wiped too.")?
                {
                    println!("Reset cancelled.");
                    return Ok(());
                }

                store.reset_recipes();
                println!("Restored {} built-in recipes.", store.recipes().len());
                Ok(())
            }

            RecipeSubcommand::Cook { id, at } => {
                let recipe = store
                    .recipe(id)
                    .ok_or_else(|| format!("Recipe not found: {}", id))?;
                let entry = DiaryEntry::from_recipe(recipe, at_or_now(at)?);
                let entry_id = entry.id.clone();

                store.add_diary_entry(entry);

                if let Some(added) = store.entry(&entry_id) {
                    println!("Logged meal from recipe:");
                    println!("{}", added);
                }
                Ok(())
            }
        }
    }
}
