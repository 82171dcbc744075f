use clap::{Parser, Subcommand};
use std::process::ExitCode;

use orbitrack::ephemeris::MemoryStore;
use orbitrack::ingest;
use orbitrack::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "orbitrack")]
#[command(about = "Orbital state vector query service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the query API
    Serve { config: String },
    /// Fetch the ephemeris, refresh the snapshot and exit
    Ingest { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::Ingest { config } => ingest_once(&config).await,
    }
}

async fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run_server(config).await {
        eprintln!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn ingest_once(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.ephemeris.snapshot_path.is_none() {
        log::warn!("no snapshot path configured, fetched data will not persist");
    }

    let store = MemoryStore::open(config.ephemeris.snapshot_path.clone());
    match ingest::populate(&store, &config.ephemeris.source_url).await {
        Ok(count) => {
            println!("Loaded {} state vectors", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Ingestion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
