//! prism - ingest resumes into a deduplicated profile store.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use prism::config::{default_config_path, load_config, load_config_or_default};
use prism::db::profile_repo;
use prism::pipeline::{ProgressEvent, ProgressReporter};
use prism::{
    ingest_path, ChatCompletionsClient, Config, Database, Outcome, Pipeline, PipelineConfig,
    ProcessorRegistry, ProfileStore, ResumeProfile, WorkflowState,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

#[derive(Parser)]
#[command(name = "prism", about = "Resume ingestion and profile lookup", version)]
struct Cli {
    /// Config file (defaults to ~/.prism/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides the config
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a document, extract its profile and store it if new
    Process {
        /// Path to a .pdf, .docx or .txt file
        file: PathBuf,
    },

    /// Look up a stored profile by email or by name
    #[command(group(ArgGroup::new("key").required(true).args(["email", "name"])))]
    Search {
        /// Email address (exact match, case-insensitive)
        email: Option<String>,

        /// Name fragment
        #[arg(long)]
        name: Option<String>,
    },

    /// List every stored profile
    List,
}

/// Prints each step's status line as the run advances.
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Step { message, .. } => println!("{}", message),
            ProgressEvent::Failed { step, error } => {
                eprintln!("Step {} failed: {}", step.as_str(), error)
            }
            ProgressEvent::Completed { .. } => {}
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_json) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Route `log` records from the library's storage layer into tracing.
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    let db_path = match cli.db {
        Some(path) => path,
        None => config
            .database_path()
            .context("Could not determine database path (no home directory)")?,
    };
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match cli.command {
        Commands::Process { file } => process(&config, db, &file),
        Commands::Search { email, name } => search(&db, email.as_deref(), name.as_deref()),
        Commands::List => list(&db),
    }
}

fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => match default_config_path() {
            Some(path) => load_config_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn process(config: &Config, db: Database, file: &Path) -> Result<()> {
    let api_key = config
        .inference
        .resolve_api_key()
        .context("Failed to resolve inference API key")?;
    let client = ChatCompletionsClient::new(&config.inference, api_key)
        .context("Failed to build inference client")?;

    let pipeline = Pipeline::new(
        Arc::new(PipelineConfig::from_config(config)),
        Arc::new(client),
        Arc::new(db),
    );

    let state = ingest_path(&ProcessorRegistry::new(), &pipeline, file, &ConsoleProgress)
        .with_context(|| format!("Failed to process {}", file.display()))?;

    render_outcome(&state)
}

fn render_outcome(state: &WorkflowState) -> Result<()> {
    let message = state.final_message.as_deref().unwrap_or_default();

    match state.outcome() {
        Some(Outcome::NotAResume) => {
            println!("Document is not a resume. Reason: {}", message);
        }
        Some(Outcome::AlreadyExists) => {
            println!("{}", message);
            if let Some(existing) = &state.existing_profile_data {
                print_profile(existing)?;
            }
        }
        Some(Outcome::Inserted) => {
            println!("{}", message);
            if let Some(profile) = &state.profile_data {
                print_profile(profile)?;
            }
        }
        None => println!("{}", message),
    }
    Ok(())
}

fn search(db: &Database, email: Option<&str>, name: Option<&str>) -> Result<()> {
    if let Some(name) = name {
        match profile_repo::search_by_name(db, name).context("Name search failed")? {
            Some(profile) => print_profile(&profile)?,
            None => println!("No profile found matching name: {}", name),
        }
        return Ok(());
    }

    let email = email.unwrap_or_default();
    match db.exists(email).context("Email lookup failed")? {
        Some(profile) => print_profile(&profile)?,
        None => println!("No profile found with email: {}", email),
    }
    Ok(())
}

fn list(db: &Database) -> Result<()> {
    let rows = db.list_all().context("Failed to list profiles")?;
    if rows.is_empty() {
        println!("No profiles stored yet.");
        return Ok(());
    }

    println!("{:<32} {}", "NAME", "EMAIL");
    for row in &rows {
        println!(
            "{:<32} {}",
            row.name.as_deref().unwrap_or("-"),
            row.email.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} profile(s)", rows.len());
    Ok(())
}

fn print_profile(profile: &ResumeProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile).context("Failed to render profile")?;
    println!("{}", json);
    Ok(())
}
