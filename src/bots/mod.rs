pub mod random;
pub mod updown;

pub use random::RandomBot;
pub use updown::UpDownBot;

use crate::api::{Command, SimulationState};
use serde::{Deserialize, Serialize};

/// Session facts a policy may need beyond the state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub num_floors: u32,
    /// Number of the turn the batch is for, starting at 1.
    pub turn: u64,
}

/// Elevator-control strategy: turns the latest state into the next batch.
///
/// Policies know nothing about transport; the driver feeds them states and
/// submits whatever they return.
pub trait Policy {
    fn decide(&mut self, state: &SimulationState, ctx: TurnContext) -> Vec<Command>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// A policy built from a closure. See [`from_fn`].
pub struct FnPolicy<F> {
    name: String,
    decide: F,
}

/// Wrap a closure as a [`Policy`].
pub fn from_fn<F>(name: impl Into<String>, decide: F) -> FnPolicy<F>
where
    F: FnMut(&SimulationState, TurnContext) -> Vec<Command>,
{
    FnPolicy {
        name: name.into(),
        decide,
    }
}

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&SimulationState, TurnContext) -> Vec<Command>,
{
    fn decide(&mut self, state: &SimulationState, ctx: TurnContext) -> Vec<Command> {
        (self.decide)(state, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Built-in policies selectable from config and the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PolicyKind {
    /// Uniformly random direction and action for every elevator
    #[default]
    Random,
    /// Sweep up and down, stopping for riders and matching hall calls
    #[value(name = "updown")]
    UpDown,
}

/// Factory: create the policy named by `kind`.
pub fn create_policy(kind: PolicyKind) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Random => Box::new(RandomBot::new()),
        PolicyKind::UpDown => Box::new(UpDownBot::new()),
    }
}
