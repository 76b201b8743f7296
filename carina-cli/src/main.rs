use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use carina_core::provider::Provider;
use carina_core::resource::{Resource, ResourceId, State, Value};
use carina_provider_cloudfoundry::{CloudFoundryProvider, Config};

#[derive(Parser)]
#[command(name = "carina-cf")]
#[command(about = "Run Cloud Foundry provider lifecycle operations", long_about = None)]
struct Cli {
    /// Cloud Foundry API endpoint (overrides CF_API_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// OAuth access token (overrides CF_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// JSON file with provider settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (RUST_LOG takes precedence when set)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage a space
    Space {
        #[command(subcommand)]
        command: SpaceCommands,
    },
    /// Look up a service plan by service label and plan name
    ServicePlan {
        /// Service label, e.g. cleardb
        #[arg(long)]
        service: String,
        /// Plan name, e.g. shared
        #[arg(long)]
        plan: String,
    },
}

#[derive(Subcommand)]
enum SpaceCommands {
    /// Create a space
    Create {
        #[arg(long)]
        name: String,
        /// Organization the space belongs to
        #[arg(long)]
        org: String,
        /// Space quota definition to assign
        #[arg(long)]
        space_quota: Option<String>,
    },
    /// Show a space
    Read {
        #[arg(long)]
        id: String,
    },
    /// Rename a space (org and space quota must match the existing space)
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Organization the space belongs to
        #[arg(long)]
        org: String,
        /// Space quota definition the space is bound to
        #[arg(long)]
        space_quota: Option<String>,
    },
    /// Delete a space
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Check whether a space still exists
    Exists {
        #[arg(long)]
        id: String,
    },
    /// Adopt an existing space by GUID
    Import {
        #[arg(long)]
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    load_config_with(cli, |key| std::env::var(key).ok())
}

/// File settings, then environment, then command-line flags
fn load_config_with(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut config = base.merge_env(env)?;

    if let Some(endpoint) = &cli.endpoint {
        config.api_endpoint = endpoint.clone();
    }
    if let Some(token) = &cli.token {
        config.access_token = Some(token.clone());
    }

    config.validated_endpoint()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).context("Failed to load provider configuration")?;
    tracing::info!("Using Cloud Foundry API at {}", config.api_endpoint);
    let provider = CloudFoundryProvider::new(config);

    match cli.command {
        Commands::Space { command } => run_space(&provider, command).await,
        Commands::ServicePlan { service, plan } => {
            let lookup = Resource::new("service_plan", "lookup")
                .with_attribute("service", Value::String(service))
                .with_attribute("plan", Value::String(plan));
            let state = provider.read_data_source(&lookup).await?;
            print_state(&state)
        }
    }
}

fn space_id() -> ResourceId {
    ResourceId::new("space", "cli")
}

fn desired_space(name: String, org: String, space_quota: Option<String>) -> Resource {
    let resource = Resource::new("space", "cli")
        .with_attribute("name", Value::String(name))
        .with_attribute("org", Value::String(org));
    match space_quota {
        Some(quota) => resource.with_attribute("space_quota", Value::String(quota)),
        None => resource,
    }
}

async fn run_space(provider: &CloudFoundryProvider, command: SpaceCommands) -> Result<()> {
    match command {
        SpaceCommands::Create {
            name,
            org,
            space_quota,
        } => {
            let state = provider
                .create(&desired_space(name, org, space_quota))
                .await?;
            eprintln!("{}", "Space created.".green());
            print_state(&state)
        }
        SpaceCommands::Read { id } => {
            let state = provider.read(&space_id(), Some(&id)).await?;
            print_state(&state)
        }
        SpaceCommands::Update {
            id,
            name,
            org,
            space_quota,
        } => {
            let current = provider.read(&space_id(), Some(&id)).await?;
            let desired = desired_space(name, org, space_quota);
            let state = provider.update(&space_id(), &id, &current, &desired).await?;
            print_state(&state)
        }
        SpaceCommands::Delete { id } => {
            provider.delete(&space_id(), &id).await?;
            println!("{} {}", "Deleted space".green(), id);
            Ok(())
        }
        SpaceCommands::Exists { id } => {
            let exists = provider.exists(&space_id(), &id).await?;
            println!("{}", json!({ "id": id, "exists": exists }));
            Ok(())
        }
        SpaceCommands::Import { id } => {
            let state = provider.import(&space_id(), &id).await?;
            print_state(&state)
        }
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Int(i) => json!(i),
        Value::Bool(b) => json!(b),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

fn state_to_json(state: &State) -> serde_json::Value {
    let attributes: serde_json::Map<String, serde_json::Value> = state
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), value_to_json(v)))
        .collect();
    json!({
        "type": state.id.resource_type,
        "id": state.identifier,
        "exists": state.exists,
        "attributes": attributes,
    })
}

fn print_state(state: &State) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&state_to_json(state))?);
    Ok(())
}
