//! CPJ Prazos MCP Server - Main Entry Point
//!
//! The actual implementation is in the `cpj_prazos` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cpj_prazos::{AgendaConfig, CpjServerHandler};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// CPJ Prazos - expert deadlines and examinations agenda via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding peritos.json, prazos.json and pericias.json
    data_dir: String,

    /// TOML file overriding file names and query windows
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP stream, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => AgendaConfig::load(path)?,
        None => AgendaConfig::default(),
    };

    info!(data_dir = %args.data_dir, "starting agenda server");
    let handler = CpjServerHandler::new(&args.data_dir, config)?;
    serve_stdio(handler).await?;
    Ok(())
}
