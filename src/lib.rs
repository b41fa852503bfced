#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod bots;
pub mod config;
pub mod driver;
pub mod error;
pub mod observability;

pub use api::{Command, SimulationClient, SimulationState};
pub use bots::{Policy, PolicyKind};
pub use config::Config;
pub use driver::{RunOutcome, drive, play};
pub use error::{ApiError, ConfigError, DiantiError};
