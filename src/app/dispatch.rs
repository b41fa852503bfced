use crate::app::report::{render_buildings, render_outcome};
use crate::cli::{Cli, Commands, RunArgs};
use anyhow::{Context, Result};
use dianti::api::{SimulationClient, build_api_client_with_timeout};
use dianti::bots::create_policy;
use dianti::observability::create_observer;
use dianti::{Config, driver};
use std::path::Path;
use tracing::info;

/// Play one simulation with the resolved config.
///
/// 1. Loads config (file, then environment, then command-line overrides).
/// 2. Builds the session client, the policy and the observer.
/// 3. Plays the run to completion and prints score and replay link.
async fn run_simulation(config_path: Option<&Path>, args: &RunArgs) -> Result<()> {
    let mut config = Config::load(config_path)?;
    args.apply(&mut config);
    config.validate()?;

    let http = build_api_client_with_timeout(config.request_timeout_secs);
    let mut client = SimulationClient::with_client(&config.api_url, http);
    let mut policy = create_policy(config.policy);
    let observer = create_observer(&config.observability);

    info!(
        api_url = %config.api_url,
        building = %config.building,
        policy = %config.policy,
        "Starting simulation"
    );

    let outcome = driver::play(
        &mut client,
        &config.registration(),
        policy.as_mut(),
        observer.as_ref(),
    )
    .await
    .with_context(|| format!("simulation run against {} failed", config.api_url))?;

    info!(
        turns = outcome.turns,
        errors_seen = outcome.errors_seen,
        "Simulation finished"
    );
    println!("{}", render_outcome(&outcome));
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run_simulation(cli.config.as_deref(), &args).await,

        Commands::Buildings => {
            println!("{}", render_buildings());
            Ok(())
        }
    }
}
