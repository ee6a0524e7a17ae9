//! MCP Server Entry Point
//!
//! This is the main entry point for the campaign assistant server. It
//! initializes logging, loads configuration, and serves MCP over stdio.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use campaign_mcp_server::core::{Config, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the MCP server
    let server = McpServer::new(config);

    info!("Server initialized");

    server.run_stdio().await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format. Output goes
/// to stderr so it never interleaves with the stdio protocol stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
