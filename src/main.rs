use clap::{Parser, Subcommand};
use sport_diary_core::{AppStore, FileStore, Persistence};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;

use commands::{ConfigCommand, DiaryCommand, GoalsCommand, RecipeCommand, Store};
use config::Config;

#[derive(Parser)]
#[command(name = "sportdiary")]
#[command(version)]
#[command(about = "Meal and exercise diary with a recipe catalog", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, list and edit meals and exercise
    Diary(DiaryCommand),

    /// View or change daily nutrition goals
    Goals(GoalsCommand),

    /// Browse and manage recipes
    Recipe(RecipeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sportdiary=warn,sport_diary_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Diary(cmd)) => cmd.run(&mut open_store(&config))?,
        Some(Commands::Goals(cmd)) => cmd.run(&mut open_store(&config))?,
        Some(Commands::Recipe(cmd)) => cmd.run(&mut open_store(&config))?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => println!("Use --help to see available commands"),
    }

    Ok(())
}

fn open_store(config: &Config) -> Store {
    let backend = FileStore::new(config.data_dir.value.clone());
    let persistence = Persistence::with_key(backend, config.storage_key.value.clone());
    tracing::debug!(
        "Opening state '{}' in {}",
        persistence.key(),
        config.data_dir.value.display()
    );
    AppStore::open(persistence)
}
