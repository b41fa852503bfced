use clap::{Args, Parser, Subcommand};
use dianti::{Config, PolicyKind};
use std::path::PathBuf;

/// `dianti` - play the elevator simulation with a reference bot.
#[derive(Parser, Debug)]
#[command(name = "dianti")]
#[command(version)]
#[command(about = "Play the elevator simulation with a reference bot.", long_about = None)]
pub struct Cli {
    /// Log every turn and batch at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to read (default: ~/.dianti/config.toml when it exists)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `run` with the configured settings
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one simulation to completion and print the score
    Run(RunArgs),

    /// List the building configurations the server offers
    Buildings,
}

/// Per-run overrides; anything left unset falls back to config.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Policy that drives the elevators
    #[arg(short, long, value_enum)]
    pub bot: Option<PolicyKind>,

    /// Event (high score board) to enter
    #[arg(long)]
    pub event: Option<String>,

    /// Building configuration, e.g. tiny_random
    #[arg(long)]
    pub building: Option<String>,

    /// Bot name shown on the high score board
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Keep this run out of high scores and replays (`--sandbox false` to opt back in)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub sandbox: Option<bool>,

    /// Simulation endpoint
    #[arg(long)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl RunArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(bot) = self.bot {
            config.policy = bot;
        }
        if let Some(event) = &self.event {
            config.event.clone_from(event);
        }
        if let Some(building) = &self.building {
            config.building.clone_from(building);
        }
        if let Some(name) = &self.name {
            config.bot_name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            config.email.clone_from(email);
        }
        if let Some(sandbox) = self.sandbox {
            config.sandbox = sandbox;
        }
        if let Some(api_url) = &self.api_url {
            config.api_url.clone_from(api_url);
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
    }
}
