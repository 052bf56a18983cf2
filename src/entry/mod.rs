mod pipeline;


use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;

use crate::args::JetterArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::system::banner::print_cli_banner;

use pipeline::run_pipeline;

/// Runs the CLI and maps the outcome to a process exit code.
///
/// Failed requests exit non-zero without an extra message; the table already shows them.
#[must_use]
pub fn run() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation(ValidationError::RuntimeErrors)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("\nError: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> AppResult<()> {
    let args = JetterArgs::parse();

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: JetterArgs) -> AppResult<()> {
    if !args.no_banner {
        print_cli_banner(args.no_color);
    }
    let color = !args.no_color && io::stdout().is_terminal();

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut stdout = io::stdout();
    let outcome = run_pipeline(&args, &mut stdout, color, &shutdown_tx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::debug!("Signal handler ended abnormally: {}", err);
    }
    outcome
}
