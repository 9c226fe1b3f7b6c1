//! docsite CLI - check and export documentation site configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::init::ConfigFormat;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Check and export documentation site configuration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the site config file (toml, json or yaml)
    #[arg(short, long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in site configuration
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,

        /// File format (defaults to the --config extension)
        #[arg(short, long, value_enum)]
        format: Option<ConfigFormat>,
    },

    /// Validate the site configuration
    Check,

    /// Print the site configuration as JSON
    Show {
        /// Print every URL in its final, page-ready form
        #[arg(short, long)]
        resolved: bool,
    },

    /// Write generator config, page fragments and theme CSS
    Export {
        /// Output directory
        #[arg(short, long, default_value = "build")]
        output: PathBuf,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,

        /// Override the configured base path
        #[arg(long)]
        base_url: Option<String>,
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

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes, format } => {
            commands::init::run(&cli.config, format, yes)?;
        }
        Commands::Check => {
            commands::check::run(&cli.config)?;
        }
        Commands::Show { resolved } => {
            commands::show::run(&cli.config, resolved)?;
        }
        Commands::Export {
            output,
            no_minify,
            base_url,
        } => {
            commands::export::run(&cli.config, output, !no_minify, base_url)?;
        }
    }

    Ok(())
}
