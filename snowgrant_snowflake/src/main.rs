use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use snowgrant_core::{
    config::ConnectorNamespace,
    logging::{self, info, LevelFilter},
    project,
};
use snowgrant_snowflake::{apply_role_grants_file, client_from_config};

/// Converge Snowflake role grants on a role_grants.yaml file.
#[derive(Parser, Debug)]
#[command(name = "snowgrant", version, about)]
struct Args {
    /// Connector namespace in connectors.yaml
    #[arg(short, long, default_value = "snowflake")]
    connector: String,
    /// Path to the connectors.yaml file. Defaults to ~/.snowgrant/connectors.yaml
    #[arg(long)]
    credentials: Option<PathBuf>,
    /// Project directory holding role_grants.yaml
    #[arg(default_value = ".")]
    project: PathBuf,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup(args.verbose.then_some(LevelFilter::DEBUG));

    let credentials = match args.credentials {
        Some(path) => path,
        None => project::connectors_cfg_path().context("couldn't find your home directory")?,
    };
    let client = client_from_config(credentials, &ConnectorNamespace(args.connector))?;
    let states = apply_role_grants_file(&client, project::role_grants_cfg_path(&args.project)).await?;
    for state in states {
        info!(
            "{}: roles {:?}, users {:?}",
            state.role_name, state.roles, state.users
        );
    }
    Ok(())
}
