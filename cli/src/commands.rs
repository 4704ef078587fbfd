use std::{io::Write, path::PathBuf};

use clap::Subcommand;
use domain::BuildConfiguration;
use teamcity::BuildConfigurationApi;
use thiserror::Error;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print a build configuration as JSON
    Get { id: String },
    /// Create a build configuration from a JSON file and print the server's view of it
    Create {
        file: PathBuf,
        /// Delete an existing configuration with the same id first
        #[arg(long)]
        replace: bool,
    },
    /// Delete a build configuration, succeeding if it does not exist
    Delete { id: String },
    /// List the build configurations of a project
    List { project_id: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    File(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub async fn run<A, W>(api: &A, command: Command, out: &mut W) -> Result<(), CommandError>
where
    A: BuildConfigurationApi,
    W: Write,
{
    match command {
        Command::Get { id } => {
            let config = api
                .get_build_configuration(&id)
                .await
                .map_err(|err| CommandError::Api(format!("Could not get {id}: {err}")))?;
            print_configuration(&config, out)
        }
        Command::Create { file, replace } => {
            let content = std::fs::read_to_string(&file).map_err(|err| {
                CommandError::File(format!("Could not read {}: {err}", file.display()))
            })?;
            let config = serde_json::from_str(&content)?;
            let config = create(api, config, replace).await?;
            print_configuration(&config, out)
        }
        Command::Delete { id } => api
            .delete_build_configuration(&id)
            .await
            .map_err(|err| CommandError::Api(format!("Could not delete {id}: {err}"))),
        Command::List { project_id } => {
            let summaries = api
                .list_build_configurations(&project_id)
                .await
                .map_err(|err| {
                    CommandError::Api(format!("Could not list project {project_id}: {err}"))
                })?;

            for summary in summaries {
                let marker = if summary.template_flag { " (template)" } else { "" };
                writeln!(out, "{}\t{}{marker}", summary.id, summary.name)?;
            }

            Ok(())
        }
    }
}

async fn create<A>(
    api: &A,
    mut config: BuildConfiguration,
    replace: bool,
) -> Result<BuildConfiguration, CommandError>
where
    A: BuildConfigurationApi,
{
    if replace && config.is_created() {
        api.delete_build_configuration(&config.id)
            .await
            .map_err(|err| CommandError::Api(format!("Could not delete {}: {err}", config.id)))?;
    }

    api.create_build_configuration(&mut config)
        .await
        .map_err(|err| CommandError::Api(format!("Could not create {}: {err}", config.name)))?;

    Ok(config)
}

fn print_configuration<W: Write>(
    config: &BuildConfiguration,
    out: &mut W,
) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;

    Ok(())
}
