//! The turn loop: feed each state to a policy and submit its batch until the
//! server says the simulation is over.

use crate::api::{Registration, SimulationClient, SimulationState};
use crate::bots::{Policy, TurnContext};
use crate::error::ApiError;
use crate::observability::{Observer, ObserverEvent};
use std::time::Instant;
use tracing::debug;

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Turns submitted after the start call.
    pub turns: u64,
    pub score: Option<f64>,
    pub replay_url: Option<String>,
    /// Simulation errors reported over the whole run, start response included.
    pub errors_seen: usize,
    /// Errors attached to the terminal state, reported as-is next to the score.
    pub final_errors: Vec<String>,
}

/// Start a simulation with `registration` and play it to the end.
pub async fn play(
    client: &mut SimulationClient,
    registration: &Registration,
    policy: &mut dyn Policy,
    observer: &dyn Observer,
) -> Result<RunOutcome, ApiError> {
    let initial = client.start(registration).await?;
    // Record the start only once the server has accepted it.
    observer.record_event(&ObserverEvent::SimulationStart {
        event: registration.event.clone(),
        building: registration.building_name.clone(),
        bot: registration.bot.clone(),
        policy: policy.name().to_string(),
        sandbox: registration.sandbox,
    });
    drive(client, initial, policy, observer).await
}

/// Run turns on an already started session, beginning from `initial`.
///
/// Returns as soon as a state with `running == false` arrives; no batch is
/// sent after that. Transport failures abort the run and are returned to the
/// caller, who decides whether to start over.
pub async fn drive(
    client: &mut SimulationClient,
    initial: SimulationState,
    policy: &mut dyn Policy,
    observer: &dyn Observer,
) -> Result<RunOutcome, ApiError> {
    let started = Instant::now();
    let mut errors_seen = initial.errors.len();
    let mut state = initial;

    while state.running {
        let ctx = TurnContext {
            num_floors: client.num_floors(),
            turn: client.cur_turn() + 1,
        };
        let commands = policy.decide(&state, ctx);
        debug!(turn = ctx.turn, policy = policy.name(), ?commands, "batch");

        let sent = Instant::now();
        state = client.send(&commands).await?;
        errors_seen += state.errors.len();

        observer.record_event(&ObserverEvent::TurnCompleted {
            turn: client.cur_turn(),
            commands: commands.len(),
            errors: state.errors.len(),
            latency: sent.elapsed(),
        });
    }

    observer.record_event(&ObserverEvent::SimulationEnd {
        turns: client.cur_turn(),
        duration: started.elapsed(),
        score: state.score,
    });
    observer.flush();

    Ok(RunOutcome {
        turns: client.cur_turn(),
        score: state.score,
        replay_url: state.replay_url,
        errors_seen,
        final_errors: state.errors,
    })
}
