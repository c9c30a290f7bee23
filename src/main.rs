use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hover_bridge::bridge::Bridge;
use hover_bridge::config::BridgeConfig;
use hover_bridge::engine::python::PythonEngine;

#[derive(Parser)]
#[command(
    name = "hover-bridge",
    version,
    about = "Answers Python hover queries: one JSON request per stdin line, one JSON response per stdout line."
)]
struct Cli {
    /// Config file (defaults to .hover-bridge/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base of request line numbers (0 or 1)
    #[arg(long)]
    line_base: Option<u8>,

    /// Base of request column numbers (0 or 1)
    #[arg(long)]
    column_base: Option<u8>,

    /// Don't resolve imports against files next to the request path
    #[arg(long)]
    no_local_modules: bool,
}

impl Cli {
    fn apply(&self, config: &mut BridgeConfig) {
        if let Some(base) = self.line_base {
            config.positions.line_base = base;
        }
        if let Some(base) = self.column_base {
            config.positions.column_base = base;
        }
        if self.no_local_modules {
            config.search_local_modules = false;
        }
    }
}

fn main() -> Result<()> {
    // stdout carries protocol lines only
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hover_bridge=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BridgeConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("invalid command line")?;

    let engine = PythonEngine::new()
        .context("starting inference engine")?
        .with_local_modules(config.search_local_modules);

    info!(
        line_base = config.positions.line_base,
        column_base = config.positions.column_base,
        local_modules = config.search_local_modules,
        "hover-bridge ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = Bridge::new(engine, config.positions)
        .run(stdin.lock(), stdout.lock())
        .context("stream failure")?;

    info!(requests = summary.requests, failures = summary.failures, "input closed");
    Ok(())
}
