//! Connector API server.
//!
//! Runs the inbound HTTP API of a single connector.
//!
//! # Usage
//!
//! ```bash
//! CONNECTOR_ID=https://connector.example dataspace-connector --bind 0.0.0.0:8080
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::error;
use tracing_subscriber::EnvFilter;

use dataspace_connector::{Connector, Result, api};

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "dataspace-connector", version, about)]
struct Args {
    /// Address the API listens on.
    #[arg(long, env = "CONNECTOR_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// URI identifying this connector.
    #[arg(long, env = "CONNECTOR_ID")]
    connector_id: String,

    /// Dynamic attribute token attached to outbound messages.
    #[arg(long, env = "CONNECTOR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Timeout for outbound messages, in seconds.
    #[arg(long, env = "CONNECTOR_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over the `--debug` flag.
fn init_logging(debug: bool) {
    let default = if debug {
        "dataspace_connector=debug"
    } else {
        "dataspace_connector=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut builder = Connector::builder()
        .connector_id(args.connector_id)
        .request_timeout(Duration::from_secs(args.timeout_secs));

    if let Some(token) = args.token {
        builder = builder.security_token(token);
    }

    let connector = builder.build()?;
    let listener = TcpListener::bind(args.bind).await?;

    api::serve(listener, connector).await
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Connector stopped with an error");
            ExitCode::FAILURE
        }
    }
}
