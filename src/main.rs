//! Route resolution demo binary.
//!
//! Loads a declarative route table and resolves the paths given on the
//! command line, printing each resolution as JSON. Exits non-zero when
//! any path fails to resolve.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use view_router::config::load_config;
use view_router::observability::init_logging;
use view_router::Router;

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Resolve paths against a declarative route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Paths to resolve, in order.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = ?cli.config, error = %e, "failed to load route table");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        path = ?cli.config,
        routes = config.routes.len(),
        strict_match = config.strict_match,
        "route table loaded"
    );

    let router = match Router::from_config(&config) {
        Ok(router) => router,
        Err(errors) => {
            for error in &errors {
                tracing::error!(error = %error, "invalid route table");
            }
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for path in &cli.paths {
        match router.navigate(path).await {
            Ok(resolved) => match serde_json::to_string_pretty(resolved.as_ref()) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode resolution");
                    failed = true;
                }
            },
            Err(e) => {
                eprintln!("{path}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
