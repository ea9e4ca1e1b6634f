// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod retrieve;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Nimble retriever CLI
#[derive(Parser, Debug)]
#[command(name = "nimble-retriever")]
#[command(version)]
#[command(about = "Search the web or extract pages through the Nimble API", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: retrieve::ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a web search and print the documents as JSON
    Search(retrieve::SearchArgs),

    /// Extract content from one or more URLs and print the documents as JSON
    Extract(retrieve::ExtractArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.connection.into_config();
    match cli.command {
        Commands::Search(args) => retrieve::search(config, args).await,
        Commands::Extract(args) => retrieve::extract(config, args).await,
    }
}
