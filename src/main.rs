//! Moorage CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use moorage::checks;
use moorage::cli::{Cli, CommandDispatcher, Commands};
use moorage::config::Environment;
use moorage::ui::{create_ui, OutputMode, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("moorage=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moorage=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Run the deprecation checks before a command.
///
/// Advisories must never block the command itself, so failures here are
/// only logged.
fn run_startup_checks(ui: &mut dyn UserInterface) {
    if let Err(e) = checks::deprecation_checks(Environment::detect(), ui) {
        tracing::debug!(error = %e, "deprecation checks failed");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Moorage starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(output_mode);

    // Doctor runs the checks itself with full reporting.
    if !matches!(cli.command, Commands::Doctor(_)) {
        run_startup_checks(ui.as_mut());
    }

    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
