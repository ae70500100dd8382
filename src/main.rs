use std::{io, process};

use clap::{CommandFactory, error::ErrorKind};
use mdp::{
    application::{
        error::AppError,
        preview::{self, PreviewOutcome, PreviewRequest},
    },
    config::{self, CliArgs},
    domain::document::DocumentSource,
    infra::telemetry,
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    // A filter such as `--log-level off` must not swallow the fatal error.
    if dispatcher::has_been_set() && tracing::enabled!(Level::ERROR) {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let Some(source) = DocumentSource::from_flags(cli_args.file, cli_args.pipe) else {
        CliArgs::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "either --file or --pipe is required",
            )
            .exit();
    };

    let request = PreviewRequest {
        source,
        skip_preview: cli_args.skip_preview,
    };

    let outcome = preview::run(&request, &settings, &mut io::stdout().lock())?;
    match outcome {
        PreviewOutcome::Kept(artifact) => debug!(
            path = %artifact.path().display(),
            "Artifact kept"
        ),
        PreviewOutcome::Viewed { path } => debug!(
            path = %path.display(),
            "Artifact viewed and removed"
        ),
    }

    Ok(())
}
