//! TableDB Query Service Binary
//!
//! Serves table contents over HTTP, read-only.

use clap::Parser;
use tabledb::network::Server;
use tabledb::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// TableDB read-only HTTP query service
#[derive(Parser, Debug)]
#[command(name = "tabledb-api")]
#[command(about = "Read-only HTTP access to TableDB tables")]
#[command(version)]
struct Args {
    /// Table directory
    #[arg(short, long, default_value = "./db")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    listen: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tabledb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("TableDB query service v{}", tabledb::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Try: curl http://{}/records/<table>", args.listen);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .build();

    let server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to open table directory: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
