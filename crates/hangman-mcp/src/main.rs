//! # Hangman MCP Server
//!
//! Model Context Protocol server hosting server-authoritative hangman games.
//!
//! ## Overview
//!
//! This server provides MCP tools for:
//! - Game management (start, list, delete)
//! - Gameplay (guess a character, read the game state)
//!
//! ## Architecture
//!
//! This is Layer 2 - the main MCP server binary that ties together:
//! - hangman-core: Core types and configuration
//! - hangman-session: Game state machine and session registry
//!
//! ## Usage
//!
//! ```text
//! hangman-mcp [--config <path>]
//! ```

use anyhow::{bail, Context};
use rmcp::{transport::stdio, ServiceExt};

use hangman_core::ServerConfig;
use hangman_mcp::HangmanMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let config = match args.iter().position(|arg| arg == "--config") {
        Some(index) => {
            let Some(path) = args.get(index + 1) else {
                bail!("--config requires a path");
            };
            ServerConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {path}"))?
        }
        None => ServerConfig::default(),
    };

    // Initialize logging; stdout is reserved for the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Hangman MCP Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let server = HangmanMcpServer::from_config(&config).context("invalid game configuration")?;

    tracing::info!("Server initialized, starting stdio transport...");

    // Serve the MCP server over stdio
    let service = server.serve(stdio()).await.map_err(|e| {
        tracing::error!("Error starting server: {}", e);
        e
    })?;

    tracing::info!("Hangman MCP Server running on stdio");

    // Wait for the service to complete
    service.waiting().await?;

    tracing::info!("Hangman MCP Server shutting down");

    Ok(())
}
