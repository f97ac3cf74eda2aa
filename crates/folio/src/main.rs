//! Folio CLI - validate content entries against collection schemas.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Validate content entries against collection schemas")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter folio.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate content files against a collection
    Check {
        /// Collection the files belong to
        #[arg(long, default_value = "blog")]
        collection: String,

        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print collection schemas as JSON
    Schema {
        /// Only print this collection
        #[arg(long)]
        collection: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Check { collection, files } => {
            commands::check::run(&cli.config, &collection, &files)?;
        }
        Commands::Schema { collection } => {
            commands::schema::run(&cli.config, collection.as_deref())?;
        }
    }

    Ok(())
}
