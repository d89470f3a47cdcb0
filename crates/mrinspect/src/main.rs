mod cli;
mod inspect;

use std::path::Path;
use std::process::ExitCode;
use std::{fs, io};

use clap::{CommandFactory, Parser};
use color_eyre::Section;
use color_eyre::eyre::Report;
use eyre::Context;
use mrinspect_component::ResolutionError;
use mrinspect_index::ValidationError;
use mrinspect_repository::persist::{PersistError, PersistedEntity};
use mrinspect_repository::{ClientError, ModrinthRepository, Settings};
use tracing::instrument;

use crate::cli::{Options, OutputFormat, Subcommand};
use crate::inspect::{InspectError, inspect};

fn main() -> ExitCode {
    let options = Options::parse();
    if let Err(report) = color_eyre::install().and_then(|()| install_tracing()) {
        eprintln!("Error: {report:?}");
        return ExitCode::FAILURE;
    }

    match run_with_options(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let exit_code = report
                .downcast_ref::<InspectError>()
                .map_or(1, InspectError::exit_code);
            eprintln!("Error: {:?}", explain(report));
            ExitCode::from(exit_code)
        }
    }
}

#[instrument(name = "action_handling")]
fn run_with_options(options: Options) -> Result<(), Report> {
    match options.subcommand {
        Subcommand::Info { ref input, file } => {
            let settings = Settings::read_from_or_default(".")?;
            let api_base = options.api_base.clone().unwrap_or(settings.api_base);
            let repository = ModrinthRepository::new(api_base)
                .wrap_err("Failed to set up the modrinth client")?;

            let raw = read_manifest(input)?;
            let inspection = inspect(&raw, file, &repository)?;
            match options.output_format {
                OutputFormat::Human => println!("{inspection}"),
                OutputFormat::Yaml => print!("{}", serde_yml::to_string(&inspection)?),
            }
            Ok(())
        }

        Subcommand::Completions { shell } => {
            let mut command = Options::command();
            let bin_name = env!("CARGO_CRATE_NAME");
            let mut stdout = io::stdout();
            clap_complete::generate(shell, &mut command, bin_name, &mut stdout);
            Ok(())
        }
    }
}

fn read_manifest(path: &Path) -> Result<Vec<u8>, Report> {
    fs::read(path)
        .wrap_err_with(|| format!("Failed to read the manifest at {}", path.display()))
        .suggestion("Point `--input` at the `modrinth.index.json` of an unpacked `.mrpack`.")
}

/// Attach notes and suggestions saying which assumption broke.
fn explain(report: Report) -> Report {
    if let Some(error) = report.downcast_ref::<PersistError>() {
        let path = Settings::FILE_PATH;
        return match error {
            PersistError::Io { .. } => report
                .with_note(|| format!("mrinspect failed to read its settings from `{path}`.")),
            PersistError::SerdeYml(_) => report
                .with_note(|| format!("`{path}` is not valid YAML or has unexpected values."))
                .with_suggestion(|| "Fix or remove the file to fall back to the defaults."),
        };
    }

    let Some(error) = report.downcast_ref::<InspectError>() else {
        return report;
    };

    match error {
        InspectError::Validation(ValidationError::Schema { issues }) => {
            let notes: Vec<String> = issues.iter().map(ToString::to_string).collect();
            notes
                .into_iter()
                .fold(report, |report, note| report.with_note(|| note))
                .with_suggestion(|| "Make sure this is a modrinth.index.json, not some other JSON.")
        }
        InspectError::Validation(_) => report
            .with_note(|| "The manifest couldn't even be parsed as a JSON object."),
        InspectError::NoSuchFile { .. } => report
            .with_suggestion(|| "Pick another file with `--file`, counting from 0."),
        InspectError::Resolution(ResolutionError::NoDownloads) => report
            .with_note(|| "Every file is expected to have at least one download URL."),
        InspectError::Resolution(_) => report
            .with_note(|| "The first download URL of a file is expected to be a modrinth CDN one.")
            .with_note(|| {
                "Expected shape: https://cdn.modrinth.com/data/<project>/versions/<version>/<file>"
            })
            .with_suggestion(|| "Files hosted elsewhere can't be traced back to a project."),
        InspectError::Client(ClientError::NotFound { .. }) => report
            .with_note(|| "The download URL names a project the catalog doesn't know about.")
            .with_suggestion(|| "The project may have been deleted, or `--api-base` is off."),
        InspectError::Client(ClientError::Malformed { .. }) => report
            .with_note(|| "The catalog answered, but not with anything resembling a project.")
            .with_suggestion(|| "Check that `--api-base` points at a modrinth v2 API."),
        InspectError::Client(error) => {
            let transient = error.is_transient();
            let report = report.with_note(|| "The catalog could not be queried.");
            match transient {
                true => report.with_suggestion(|| "This is likely temporary, try again later."),
                false => report,
            }
        }
    }
}

fn install_tracing() -> Result<(), Report> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    let format_layer = fmt::layer().pretty().without_time().with_writer(io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
