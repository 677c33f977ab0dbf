use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use utd_directory::{DirectoryClient, DirectoryConfig, DirectoryRecord, LookupOutcome, SearchKind};

#[derive(Parser)]
#[command(name = "utd-directory")]
#[command(version)]
#[command(about = "Look people up in the UTD online directory", long_about = None)]
struct Cli {
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Skip the second request that reveals the email address
    #[arg(long, global = true)]
    no_email: bool,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search by email address
    Email { email: String },
    /// Search by display name
    Name { name: String },
    /// Search by telephone number
    Phone { number: String },
    /// Search with an explicit kind: email, displayname or telephonenumber
    Lookup {
        #[arg(value_parser = parse_kind)]
        kind: SearchKind,
        query: String,
    },
}

fn parse_kind(s: &str) -> std::result::Result<SearchKind, String> {
    s.parse().map_err(|e: utd_directory::DirectoryError| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "utd_directory=debug" } else { "utd_directory=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether a record was found.
async fn run(cli: Cli) -> Result<bool> {
    let (kind, query) = match cli.command {
        Commands::Email { email } => (SearchKind::Email, email),
        Commands::Name { name } => (SearchKind::DisplayName, name),
        Commands::Phone { number } => (SearchKind::TelephoneNumber, number),
        Commands::Lookup { kind, query } => (kind, query),
    };

    let mut config = DirectoryConfig::from_env().context("failed to load configuration")?;
    if cli.no_email {
        config.resolve_email = false;
    }

    let client = DirectoryClient::with_config(config)?;
    let outcome = client
        .lookup(kind, &query)
        .await
        .with_context(|| format!("lookup of {} '{}' failed", kind, query))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        LookupOutcome::Found(record) => {
            if !cli.json {
                print_record(&record);
            }
            Ok(true)
        }
        LookupOutcome::NotFound => {
            if !cli.json {
                println!("No directory entry matches {} '{}'", kind, query);
            }
            Ok(false)
        }
    }
}

fn print_record(record: &DirectoryRecord) {
    println!("Name: {}", record.name);
    if let Some(email) = &record.email {
        println!("Email: {}", email);
    }
    println!("Classification: {}", record.classification);
    println!("Major: {}", record.major);
    println!("School: {}", record.school);
}
