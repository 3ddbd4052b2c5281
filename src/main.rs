//! Ski Station - command-line front end
//!
//! Every subcommand maps to one skier service operation and prints its
//! result as JSON on stdout. Logs go to stderr.
//!
//! ```sh
//! # Default config (~/.config/ski-station/config.toml)
//! ski-station seed
//! ski-station add '{"first_name":"Lena","last_name":"Moser","city":"Annecy",
//!                   "subscription":{"type_sub":"ANNUAL","start_date":"2024-01-15","price":"800"}}'
//! ski-station assign-piste 1 3
//! ski-station by-type ANNUAL
//!
//! # Validate config without touching the store
//! ski-station --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use ski_station::config::{resolve_config_path, AppConfig};
use ski_station::domain::{Skier, SubscriptionType};
use ski_station::runtime::{init_tracing, seed_catalogue, RuntimeHandle};
use ski_station::shared::errors::AppError;

/// Ski station skier management.
#[derive(Parser, Debug)]
#[command(
    name = "ski-station",
    version,
    about = "Manage skiers, their subscriptions, pistes and course registrations",
    long_about = "Ski station skier management backed by SQLite or an in-memory store.\n\n\
                  Default config: ~/.config/ski-station/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SKI_STATION_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all skiers.
    List,
    /// Show one skier.
    Get { id: i64 },
    /// Delete a skier.
    Remove { id: i64 },
    /// List skiers holding a subscription of the given type (ANNUAL, SEMESTRIEL, MONTHLY).
    ByType { type_sub: String },
    /// Add a skier from a JSON document.
    Add { json: String },
    /// Add a skier from a JSON document and point its registrations at a course.
    Enroll { course_id: i64, json: String },
    /// Attach an existing subscription to a skier.
    AssignSubscription { skier_id: i64, subscription_id: i64 },
    /// Add a piste to a skier's piste set.
    AssignPiste { skier_id: i64, piste_id: i64 },
    /// Insert a demo catalogue of pistes, courses and subscriptions.
    Seed,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_skier(json: &str) -> Result<Skier, AppError> {
    Ok(serde_json::from_str(json)?)
}

async fn run(handle: &RuntimeHandle, command: Command) -> Result<(), AppError> {
    let service = &handle.service;
    match command {
        Command::List => print_json(&service.retrieve_all_skiers().await?),
        Command::Get { id } => print_json(&service.retrieve_skier(id).await?),
        Command::Remove { id } => {
            service.remove_skier(id).await?;
            print_json(&serde_json::json!({ "removed": id }))
        }
        Command::ByType { type_sub } => {
            let type_sub = SubscriptionType::parse(&type_sub);
            print_json(&service.retrieve_skiers_by_subscription_type(&type_sub).await?)
        }
        Command::Add { json } => print_json(&service.add_skier(parse_skier(&json)?).await?),
        Command::Enroll { course_id, json } => print_json(
            &service
                .add_skier_and_assign_to_course(parse_skier(&json)?, course_id)
                .await?,
        ),
        Command::AssignSubscription {
            skier_id,
            subscription_id,
        } => print_json(
            &service
                .assign_skier_to_subscription(skier_id, subscription_id)
                .await?,
        ),
        Command::AssignPiste { skier_id, piste_id } => {
            print_json(&service.assign_skier_to_piste(skier_id, piste_id).await?)
        }
        Command::Seed => print_json(&seed_catalogue(handle.repos.as_ref()).await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(resolve_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Backend     : {}", config.database.backend);
        if !config.database.is_memory() {
            println!("   Database    : {}", config.database.connection_url());
        }
        println!("   Log level   : {}", config.logging.level);
        println!("   Log format  : {}", config.logging.format);
        return Ok(());
    }

    let Some(command) = cli.command else {
        error!("No command given, see --help");
        return Ok(());
    };

    let handle = RuntimeHandle::start(config).await?;
    let result = run(&handle, command).await;
    handle.shutdown().await;

    if let Err(ref e) = result {
        error!("{}", e);
    }
    result.map_err(Into::into)
}
