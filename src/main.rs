//! Edgeship CLI - deploy Workers to the edge
//!
//! Usage: edgeship <COMMAND>
//!
//! Commands:
//!   deploy    Validate, upload and configure a Worker
//!   check     Validate the manifest without deploying
//!   bindings  List the bindings a Worker declares

mod commands;
mod ui;

use std::process;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use edgeship::error::{EXIT_CONFIG, EXIT_IO, EXIT_NETWORK};
use edgeship::logging::{init_logging, LogFormat};
use edgeship::presentation::{Cli, Commands};
use tracing::{debug, info_span};

use ui::context::UiContext;

/// Exit code for failures with no more specific classification
const EXIT_FAILURE: i32 = 1;

fn main() {
    let start = Instant::now();
    let cli = Cli::parse();
    init_logging(cli.verbose, LogFormat::from_env());

    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    let exit_code = match dispatch(cli, &ui) {
        Ok(()) => 0,
        Err(err) => {
            ui::error::print_error(&err, ui.json);
            classify_exit_code(&err)
        }
    };
    debug!(took_ms = %start.elapsed().as_millis(), exit_code, "cli.finished");
    if exit_code != 0 {
        process::exit(exit_code);
    }
}

fn dispatch(cli: Cli, ui: &UiContext) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cli.command {
        Commands::Deploy {
            env,
            dry_run,
            outdir,
        } => {
            let _span = info_span!("cmd.deploy", dry_run).entered();
            commands::cmd_deploy(&cwd, cli.config, env, dry_run, outdir, ui)
        }
        Commands::Check { env } => {
            let _span = info_span!("cmd.check").entered();
            commands::cmd_check(&cwd, cli.config, env, ui)
        }
        Commands::Bindings { env } => {
            let _span = info_span!("cmd.bindings").entered();
            commands::cmd_bindings(&cwd, cli.config, env, ui)
        }
    }
}

/// Walk the error chain for the first error that knows its exit code.
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(edgeship) = cause.downcast_ref::<edgeship::EdgeshipError>() {
            return edgeship.exit_code();
        }
        if cause.is::<edgeship::ConfigValidationError>() {
            return EXIT_CONFIG;
        }
        if cause.is::<edgeship::domain::ports::ControlPlaneError>() {
            return EXIT_NETWORK;
        }
        if cause.is::<std::io::Error>() {
            return EXIT_IO;
        }
    }
    EXIT_FAILURE
}
