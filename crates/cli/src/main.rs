mod config;
mod error;
mod observer;
mod prompt;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use flights::{FlightApi, FlightToolHost};
use runtime::tools::Observers;
use runtime::{Tool, ToolCall, ToolHost};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Config;
use error::Result;
use observer::{ConsoleObserver, TracingObserver};
use prompt::Prompt;

const CONFIG_FILE: &str = "flightdesk.toml";

#[derive(Parser)]
#[command(name = "flightdesk")]
#[command(about = "Flight status and cost lookup tools for agents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the specification of every tool as JSON
    Tools,
    /// Look up the current status of a flight
    Status {
        /// Flight identifier (e.g. AA777)
        ident: String,
    },
    /// Look up prices for a trip
    Cost {
        /// Departure airport code
        #[arg(long)]
        from: String,
        /// Arrival airport code
        #[arg(long)]
        to: String,
        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 1)]
        adults: i64,
        #[arg(long, default_value_t = 0)]
        children: i64,
        #[arg(long, default_value_t = 0)]
        infants: i64,
        /// Cabin class code (1 = economy)
        #[arg(long, default_value_t = 1)]
        cabin_class: i64,
    },
    /// Dispatch a raw tool call by capability name
    Call {
        /// Capability name (AirlineStatus, FlightCostLookup)
        tool: String,
        /// Tool input as a JSON object
        input: String,
    },
    /// Print one of the canned user prompts
    Prompt {
        #[arg(value_enum, default_value_t = Prompt::Status)]
        which: Prompt,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config.log.level);
    debug!(config = %cli.config.display(), base_url = %config.service.base_url, "configured");

    let observers = Observers::new()
        .with(Arc::new(ConsoleObserver))
        .with(Arc::new(TracingObserver));
    let host = FlightToolHost::new(FlightApi::new(config.base_url()?), Arc::new(observers));

    match cli.command {
        Commands::Tools => print_json(host.specs()),
        Commands::Status { ident } => {
            let status = host.status().run(&json!({ "ident": ident })).await?;
            info!(
                ident = status.ident().unwrap_or(ident.as_str()),
                state = ?status.state(),
                from = status.origin(),
                to = status.destination(),
                "flight status"
            );
            print_json(&status)
        }
        Commands::Cost {
            from,
            to,
            date,
            adults,
            children,
            infants,
            cabin_class,
        } => {
            let input = json!({
                "departure_airport_code": from,
                "arrival_airport_code": to,
                "departure_date": date,
                "number_of_adults": adults,
                "number_of_children": children,
                "number_of_infants": infants,
                "cabin_class": cabin_class,
            });
            let cost = host.cost().run(&input).await?;
            info!(itineraries = cost.itineraries().len(), "flight cost");
            print_json(&cost)
        }
        Commands::Call { tool, input } => {
            let input: Value = serde_json::from_str(&input)?;
            let result = host.dispatch(ToolCall::new(tool, input)).await;
            print_json(&result)
        }
        Commands::Prompt { which } => {
            println!("User 👤 : {}", which.text());
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
