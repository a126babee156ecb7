use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wat2wasm4tests::{config, pipeline};

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "wat2wasm4tests",
    about = "Compile /* wat2wasm */ comment blocks and embed the binaries as hex literals",
    version
)]
struct Cli {
    /// C++ (.cpp) or Rust (.rs) source file to update
    file: Option<PathBuf>,

    /// JSON config file (falls back to $WAT2WASM4TESTS_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON summary of every block on stdout
    #[arg(long)]
    json: bool,

    /// Log each block's options and body
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "wat2wasm4tests=debug" } else { "wat2wasm4tests=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── Main ─────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match config::resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    match pipeline::run(cli.file.as_deref(), &config) {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
            }
        }
        Err(e) => {
            if cli.json {
                let json = serde_json::json!({ "error": e, "message": e.to_string() });
                println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
            eprintln!("{e}");
        }
    }
}
