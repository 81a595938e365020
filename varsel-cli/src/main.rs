//! ## varsel-cli
//! **Operational frontend for the varsel passive-check reporter**
//!
//! Feeds the status engine from a line-oriented event stream on stdin and
//! delivers reports through the logging sink. `check` validates the
//! configuration hierarchy and exits.

use clap::Parser;

mod classify;
mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    commands::run_command(cli).await
}
