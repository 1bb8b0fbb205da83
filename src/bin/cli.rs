//! TableDB Shell
//!
//! Line-oriented command interface over the table directory.

use std::io;

use clap::Parser;
use tabledb::protocol::CommandType;
use tabledb::{Config, Engine, Shell};
use tracing_subscriber::{fmt, EnvFilter};

/// TableDB shell
#[derive(Parser, Debug)]
#[command(name = "tabledb-shell")]
#[command(about = "Command shell for TableDB tables")]
#[command(version)]
struct Args {
    /// Table directory
    #[arg(short, long, default_value = "./db")]
    data_dir: String,

    /// Snapshot directory for backupDB / restoreDB / restorePart
    #[arg(short, long, default_value = "./backup")]
    backup_dir: String,

    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // Logs go to stderr; keep them quiet so command output stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .backup_dir(&args.backup_dir)
        .build();

    let engine = match Engine::open(config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    if !args.quiet {
        println!("TableDB shell v{} ({})", tabledb::VERSION, args.data_dir);
        println!("Commands:");
        for command in CommandType::ALL {
            println!("  {} {}", command.keyword(), command.usage());
        }
        println!("Type 'exit' to quit.");
    }

    let stdin = io::stdin();
    let shell = Shell::new(&engine);
    match shell.run(stdin.lock(), io::stdout()) {
        Ok(stats) => {
            tracing::debug!(executed = stats.executed, failed = stats.failed, "session ended");
        }
        Err(e) => {
            tracing::error!("Shell I/O error: {}", e);
            std::process::exit(1);
        }
    }

    if engine.in_transaction() {
        tracing::warn!(
            staged = engine.staged_operations(),
            "exiting with an uncommitted transaction; staged operations discarded"
        );
    }
}
