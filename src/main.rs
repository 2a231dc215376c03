//! Obesity Risk CLI - assessment form server
//!
//! # Commands
//!
//! - `serve` - Load the classifier and serve the assessment form
//! - `info` - Show version and the model artifact's metadata

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use obesity_risk::{
    api::{create_router, AppState},
    config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT},
    error::{Error, Result},
    forest::ForestClassifier,
    load_model, Classifier,
};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

/// Obesity Risk - AI weight-category assessment
#[derive(Parser)]
#[command(name = "obesity-risk")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the assessment server
    ///
    /// Examples:
    ///   obesity-risk serve
    ///   obesity-risk serve --port 9000 --model ./forest.json
    ///   obesity-risk serve --demo
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Model artifact (defaults to ../models/ next to the binary)
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Log level: error, warn, info, debug, trace
        #[arg(long, default_value = "info")]
        log_level: String,

        /// Serve the demo model compiled into the binary
        #[arg(long, conflicts_with = "model")]
        demo: bool,
    },
    /// Show version and model information
    Info {
        /// Model artifact (defaults to ../models/ next to the binary)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model,
            log_level,
            demo,
        } => {
            init_tracing(&log_level)?;
            let config = ServerConfig::new(host, port, model)?;
            let state = if demo {
                info!("Using the bundled demo model");
                AppState::demo()?
            } else {
                load_state(&config.model_path)?
            };
            serve(&config, state).await
        },
        Commands::Info { model } => {
            let path = match model {
                Some(p) => p,
                None => obesity_risk::default_model_path()?,
            };
            print_info(&path);
            Ok(())
        },
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| Error::Config(format!("unknown log level '{level}'")))?;
    let layer = tracing_subscriber::fmt::layer().with_filter(filter);
    tracing_subscriber::registry().with(layer).init();
    Ok(())
}

fn load_state(path: &std::path::Path) -> Result<AppState> {
    // A failed load still serves: every page shows the error instead of the form
    let loaded = load_model(path);
    if loaded.is_err() {
        warn!("Serving without a model; predictions are disabled");
    }
    AppState::from_load(loaded)
}

async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");
    println!("Obesity Risk assessment running on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /            - Assessment form");
    println!("  POST /v1/predict  - JSON prediction");
    println!("  GET  /health      - Health check");
    println!("  GET  /metrics     - Prometheus metrics");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}

fn print_info(path: &std::path::Path) {
    println!("obesity-risk {}", obesity_risk::VERSION);
    println!("Model path: {}", path.display());

    let model: ForestClassifier = match load_model(path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error loading model: {e}");
            std::process::exit(1);
        },
    };

    let meta = model.metadata();
    println!("Model: {} v{}", meta.name, meta.version);
    if let Some(acc) = meta.accuracy {
        println!("Accuracy: {}", obesity_risk::presentation::format_accuracy(acc));
    }
    println!("Trees: {}", model.n_trees());
    let classes: Vec<&str> = model.classes().iter().map(|c| c.as_str()).collect();
    println!("Classes: {}", classes.join(", "));
    let steps = model.preprocessing();
    if !steps.is_empty() {
        println!("Preprocessing: {steps:?}");
    }
}
