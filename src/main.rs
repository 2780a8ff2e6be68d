mod agent;
mod cli;
mod config;
mod utils;
mod verify;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use crate::agent::{FlightAgent, SearchAgent};
use crate::cli::{Cli, Commands};
use crate::config::{Config, ConfigManager, CredentialStatus, Credentials};
use crate::verify::{VerificationRunner, VerifyParams};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file; its absence is fine and
    // the process environment still applies.
    match dotenv::dotenv() {
        Ok(path) => println!("📄 Loaded environment variables from {}", path.display()),
        Err(_) => println!("⚠️  No .env file found (using system environment variables)"),
    }

    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    // Load configuration
    let config_manager = if let Some(config_path) = cli.config_path {
        ConfigManager::with_path(config_path)
    } else {
        ConfigManager::new()?
    };

    log::debug!("Using config at {}", config_manager.config_path().display());
    let config = config_manager.load()?;

    match cli.command {
        None => handle_verify(&config, VerifyParams::default()).await,
        Some(Commands::Verify { origin, destination, city, date, days }) => {
            let params = VerifyParams {
                origin,
                destination,
                destination_city: city,
                date,
                window_days: days,
                ..VerifyParams::default()
            };
            handle_verify(&config, params).await
        }
        Some(Commands::Search { origin, destination, date }) => {
            handle_search(&config, &origin, &destination, date).await
        }
        Some(Commands::Itinerary { destination, keywords, budget, days }) => {
            handle_itinerary(&config, &destination, &keywords, budget, days).await
        }
        Some(Commands::Version) => {
            println!("flight-agent-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}

async fn handle_verify(config: &Config, params: VerifyParams) -> Result<()> {
    let credentials = CredentialStatus::from_env();
    let runner = VerificationRunner::new(params);

    let report = runner
        .run(&credentials, |creds| SearchAgent::new(creds, config))
        .await;

    log::debug!("Verification finished, passed={}", report.passed);

    // The printed report is the outcome; the process exits 0 either way.
    Ok(())
}

async fn handle_search(
    config: &Config,
    origin: &str,
    destination: &str,
    date: NaiveDate,
) -> Result<()> {
    let agent = SearchAgent::new(Credentials::from_env()?, config);
    let results = agent.search_flights(origin, destination, date).await?;

    if let Some(message) = results.error {
        return Err(anyhow::anyhow!("Flight search error: {}", message));
    }

    if results.best_flights.is_empty() {
        println!("No flights found for {} → {} on {}", origin, destination, date);
        return Ok(());
    }

    println!("Best flights {} → {} on {}:", origin, destination, date);
    for option in &results.best_flights {
        let duration = option
            .total_duration
            .map(|minutes| format!("{} min", minutes))
            .unwrap_or_else(|| "unknown duration".to_string());
        println!("  {} {} ({})", option.display_price(), agent.currency(), duration);

        for leg in &option.flights {
            let airline = leg.airline.as_deref().unwrap_or("unknown airline");
            let number = leg.flight_number.as_deref().unwrap_or("");
            println!("    {} {}", airline, number);
        }
    }

    Ok(())
}

async fn handle_itinerary(
    config: &Config,
    destination: &str,
    keywords: &[String],
    budget: f64,
    days: u32,
) -> Result<()> {
    let agent = SearchAgent::new(Credentials::from_env()?, config);
    let itinerary = agent
        .create_itinerary_with_ai(destination, keywords, budget, days)
        .await?;

    println!("{}", itinerary);

    Ok(())
}
