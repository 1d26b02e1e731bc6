//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - `--env` falls back to `EDGESHIP_ENV`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Edgeship - deploy Workers to the edge
#[derive(Parser, Debug)]
#[command(name = "edgeship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to edgeship.toml (default: search upwards from the current directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate, upload and configure a Worker
    Deploy {
        /// Environment to deploy (`[env.<name>]`)
        #[arg(short, long, env = "EDGESHIP_ENV")]
        env: Option<String>,

        /// Build and validate everything without contacting the API
        #[arg(long)]
        dry_run: bool,

        /// Write the upload metadata and modules to this directory
        #[arg(long, value_name = "DIR")]
        outdir: Option<PathBuf>,
    },

    /// Validate the manifest without deploying
    Check {
        /// Environment to validate
        #[arg(short, long, env = "EDGESHIP_ENV")]
        env: Option<String>,
    },

    /// List the bindings a Worker declares
    Bindings {
        /// Environment to resolve
        #[arg(short, long, env = "EDGESHIP_ENV")]
        env: Option<String>,
    },
}
