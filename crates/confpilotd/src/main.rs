//! confpilotd — the confpilot daemon.
//!
//! Single binary with one subcommand per service:
//! - Coordinator (`POST /message`)
//! - Schema store (`GET /{app}` from `<dir>/<app>.schema.json`)
//! - Values store (`GET /{app}` from `<dir>/<app>.values.json`)
//!
//! # Usage
//!
//! ```text
//! confpilotd schema-store --listen 0.0.0.0:5001 --schema-dir /data/schemas
//! confpilotd values-store --listen 0.0.0.0:5002 --values-dir /data/values
//! confpilotd coordinator --config /etc/confpilot/confpilot.toml
//! ```

mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use confpilot_core::config::validate_listen;
use confpilot_core::{CoordinatorConfig, SourceConfig};
use confpilot_coordinator::Coordinator;
use confpilot_store::DocumentStore;

const DEFAULT_LOG_FILTER: &str = "info,confpilotd=debug,confpilot_coordinator=debug";

#[derive(Parser)]
#[command(name = "confpilotd", about = "confpilot daemon", version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the coordinator (classify, patch, validate).
    Coordinator(CoordinatorArgs),

    /// Serve JSON Schemas from a directory.
    SchemaStore {
        /// host:port to listen on.
        #[arg(long, default_value = "0.0.0.0:5001")]
        listen: String,

        /// Directory containing `<app>.schema.json` files.
        #[arg(long, default_value = "/data/schemas")]
        schema_dir: PathBuf,
    },

    /// Serve current configuration values from a directory.
    ValuesStore {
        /// host:port to listen on.
        #[arg(long, default_value = "0.0.0.0:5002")]
        listen: String,

        /// Directory containing `<app>.values.json` files.
        #[arg(long, default_value = "/data/values")]
        values_dir: PathBuf,
    },
}

#[derive(clap::Args, Debug, Default)]
struct CoordinatorArgs {
    /// Path to confpilot.toml. Built-in defaults apply without it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// host:port to listen on (overrides the config file).
    #[arg(long)]
    listen: Option<String>,

    /// Oracle generate endpoint.
    #[arg(long)]
    oracle_url: Option<String>,

    /// Model name sent to the oracle.
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the schema store.
    #[arg(long)]
    schema_url: Option<String>,

    /// Base URL of the values store.
    #[arg(long)]
    values_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    match cli.command {
        Command::Coordinator(args) => run_coordinator(args).await,
        Command::SchemaStore { listen, schema_dir } => {
            run_store(&listen, DocumentStore::schemas(schema_dir)).await
        }
        Command::ValuesStore { listen, values_dir } => {
            run_store(&listen, DocumentStore::values(values_dir)).await
        }
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

/// Resolve the coordinator config: file (or defaults), then CLI overrides.
fn coordinator_config(args: CoordinatorArgs) -> anyhow::Result<CoordinatorConfig> {
    let mut config = match &args.config {
        Some(path) => CoordinatorConfig::from_file(path)?,
        None => CoordinatorConfig::default(),
    };

    if let Some(listen) = args.listen {
        config.listen = listen;
    }
    if let Some(url) = args.oracle_url {
        config.oracle.url = url;
    }
    if let Some(model) = args.model {
        config.oracle.model = model;
    }
    if let Some(url) = args.schema_url {
        config.schemas = SourceConfig::Url { url };
    }
    if let Some(url) = args.values_url {
        config.values = SourceConfig::Url { url };
    }

    validate_listen(&config.listen)?;
    Ok(config)
}

async fn run_coordinator(args: CoordinatorArgs) -> anyhow::Result<()> {
    let config = coordinator_config(args)?;
    info!(
        oracle = %config.oracle.url,
        model = %config.oracle.model,
        schemas = ?config.schemas,
        values = ?config.values,
        "coordinator starting"
    );

    let coordinator = Coordinator::from_config(&config)?;
    let router = confpilot_api::coordinator_router(coordinator);
    serve::serve("coordinator", &config.listen, router).await
}

async fn run_store(listen: &str, store: DocumentStore) -> anyhow::Result<()> {
    warn_if_missing(store.dir());
    info!(kind = %store.kind(), dir = ?store.dir(), "document store starting");

    let service = match store.kind() {
        confpilot_store::DocumentKind::Schema => "schema-store",
        confpilot_store::DocumentKind::Values => "values-store",
    };
    let router = confpilot_api::store_router(store);
    serve::serve(service, listen, router).await
}

fn warn_if_missing(dir: &Path) {
    if !dir.is_dir() {
        warn!(?dir, "store directory does not exist; every lookup will be not found");
    }
}
