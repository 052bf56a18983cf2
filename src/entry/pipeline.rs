use std::io::Write;

use tracing::info;

use crate::args::JetterArgs;
use crate::config::load_environment_file;
use crate::domain::Collection;
use crate::error::{AppError, AppResult, ValidationError};
use crate::executor::submit;
use crate::inject::{OAuth2TokenProvider, inject};
use crate::parser::parse_file;
use crate::report::{aggregate, render_table};
use crate::shutdown::ShutdownSender;
use crate::system::progress::Progress;

const PARSING: &str = "Parsing .http file...";
const READING_ENV: &str = "Reading Environment...";
const INJECTING: &str = "Injecting Variables...";
const RUNNING: &str = "Running Scenario...";

/// Parse, inject, run, and report, writing progress and the table to `out`.
///
/// # Errors
///
/// Returns the first parse, environment, injection, or setup error. When the
/// run completes with failed requests the table is still written and
/// `ValidationError::RuntimeErrors` is returned.
pub(crate) async fn run_pipeline<W>(
    args: &JetterArgs,
    out: &mut W,
    color: bool,
    shutdown_tx: &ShutdownSender,
) -> AppResult<()>
where
    W: Write + ?Sized,
{
    let step = Progress::start(out, PARSING, color)?;
    let mut collection = finish(step, out, parse_file(&args.file))?;
    info!(
        "Parsed {} request(s) from {}",
        collection.requests.len(),
        args.file.display()
    );

    if let Some(selector) = args.env.as_ref() {
        let step = Progress::start(out, READING_ENV, color)?;
        let env = finish(
            step,
            out,
            load_environment_file(&selector.path, &selector.name),
        )?;

        let step = Progress::start(out, INJECTING, color)?;
        let injected = inject_with_oauth2(&mut collection, &env).await;
        finish(step, out, injected)?;
    }

    if args.dump {
        write!(out, "\n{}", collection.to_scenario_text())?;
        out.flush()?;
        return Ok(());
    }

    let scenario = args.scenario(collection);
    let step = Progress::start(out, RUNNING, color)?;
    let result = finish(step, out, submit(&scenario, shutdown_tx).await)?;
    writeln!(out)?;

    let metrics = aggregate(&result);
    render_table(&metrics, out, color)?;

    if result.any_error {
        return Err(AppError::validation(ValidationError::RuntimeErrors));
    }
    Ok(())
}

async fn inject_with_oauth2(
    collection: &mut Collection,
    env: &crate::domain::Environment,
) -> AppResult<()> {
    let provider = OAuth2TokenProvider::new()?;
    inject(collection, env, &provider).await?;
    Ok(())
}

fn finish<W, T, E>(step: Progress<'_>, out: &mut W, outcome: Result<T, E>) -> AppResult<T>
where
    W: Write + ?Sized,
    E: Into<AppError>,
{
    match outcome {
        Ok(value) => {
            step.succeed(out)?;
            Ok(value)
        }
        Err(err) => {
            step.fail(out)?;
            Err(err.into())
        }
    }
}
