//! News trust backend daemon.
//!
//! Startup: generate the process keypair (fatal on failure) → load the
//! trained classifier artifact (fatal if missing) → serve the HTTP API.
//! The keypair never touches disk; signatures from one process instance
//! are only verifiable against the public key that instance exports.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};

use newstrust::api::{self, AppState};
use newstrust::classifier::TfidfClassifier;
use newstrust::config::Config;
use newstrust::signing::KeyManager;

#[derive(Parser)]
#[command(name = "newstrust", version, about = "Content signing and fake-news classification API")]
struct Cli {
    /// Path to YAML config file (default: ./config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interface the HTTP API binds to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Path to the trained model artifact
    #[arg(long, default_value = "model.json")]
    model: PathBuf,

    /// Generate a default config.yaml and exit
    #[arg(long)]
    init_config: bool,
}

/// Build the final Config by merging: defaults -> YAML file -> CLI overrides.
fn build_config(cli: &Cli, matches: &clap::ArgMatches) -> anyhow::Result<Config> {
    use clap::parser::ValueSource;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.yaml"));

    let mut config = match Config::load_from_file(&config_path)? {
        Some(file_config) => {
            tracing::info!(path = %config_path.display(), "loaded config file");
            file_config
        }
        None => {
            tracing::debug!(path = %config_path.display(), "no config file found, using defaults");
            Config::default()
        }
    };

    // Only apply CLI values the user explicitly passed.
    if matches.value_source("bind") == Some(ValueSource::CommandLine) {
        config.bind = cli.bind.clone();
    }
    if matches.value_source("port") == Some(ValueSource::CommandLine) {
        config.port = cli.port;
    }
    if matches.value_source("model") == Some(ValueSource::CommandLine) {
        config.model_path = cli.model.clone();
    }

    config.validate()?;

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newstrust=info".into()),
        )
        .init();

    let mut matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches_mut(&mut matches)?;

    if cli.init_config {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        Config::write_default_config(&config_path)?;
        println!("Config written to {}", config_path.display());
        return Ok(());
    }

    let config = build_config(&cli, &matches)?;

    // One keypair per process lifetime. Without it the service must not
    // accept traffic, so failure aborts startup.
    let keys = KeyManager::generate().context("key generation failed, refusing to start")?;

    let classifier = TfidfClassifier::load(&config.model_path).with_context(|| {
        format!(
            "failed to load model from {} (run newstrust-train first)",
            config.model_path.display()
        )
    })?;

    tracing::info!(
        bind = %config.bind,
        port = config.port,
        model = %config.model_path.display(),
        "newstrust starting"
    );

    let state = AppState::new(keys, Arc::new(classifier));
    let app = api::router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "HTTP API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
