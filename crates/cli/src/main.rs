use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use filter_syntax::{Filter, FilterSettings, Relation};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "filterctl",
    version = "0.1.0",
    about = "Inspect and edit query filter strings"
)]
struct Cli {
    #[arg(long, global = true, help = "Filter settings file (JSON)")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { filter } => {
            println!("{}", Filter::from_string(&filter));
        }
        Commands::Terms { filter, json } => {
            let filter = Filter::from_string(&filter);
            if json {
                println!("{}", output::terms_json(&filter)?);
            } else {
                print!("{}", output::terms_table(&filter));
            }
        }
        Commands::Get { filter, keyword } => {
            match Filter::from_string(&filter).get_with(&keyword, &settings) {
                Some(value) => println!("{value}"),
                None => debug!("Keyword '{}' not present", keyword),
            }
        }
        Commands::Set {
            filter,
            keyword,
            value,
            relation,
        } => {
            let relation: Relation = relation.parse()?;
            let mut filter = Filter::from_string(&filter);
            println!("{}", filter.set(&keyword, value, relation));
        }
        Commands::Delete { filter, keyword } => {
            println!("{}", Filter::from_string(&filter).delete(&keyword));
        }
        Commands::Next { filter } => {
            println!("{}", Filter::from_string(&filter).next_with(&settings));
        }
        Commands::Previous { filter } => {
            println!("{}", Filter::from_string(&filter).previous_with(&settings));
        }
        Commands::First { filter } => {
            println!("{}", Filter::from_string(&filter).first_page());
        }
        Commands::All { filter } => {
            println!("{}", Filter::from_string(&filter).all());
        }
        Commands::Simple { filter } => {
            println!("{}", Filter::from_string(&filter).simple());
        }
        Commands::Criteria { filter } => {
            println!("{}", Filter::from_string(&filter).to_criteria_string());
        }
        Commands::Equals { filter, other } => {
            let equal = Filter::from_string(&filter).equals(&Filter::from_string(&other));
            println!("{equal}");
        }
        Commands::FromRecord { path } => {
            let source = std::fs::read_to_string(&path)?;
            println!("{}", Filter::from_json(&source)?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&str>) -> Result<FilterSettings, CliError> {
    let settings = match path {
        Some(path) => FilterSettings::from_file(path)?,
        None => FilterSettings::default(),
    };
    Ok(settings.with_env_overrides()?)
}
