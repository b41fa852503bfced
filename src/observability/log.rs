use super::traits::{Observer, ObserverEvent};
use tracing::info;

/// Log-based observer — uses tracing, zero external deps
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        match event {
            ObserverEvent::SimulationStart {
                event,
                building,
                bot,
                policy,
                sandbox,
            } => {
                info!(
                    event = %event,
                    building = %building,
                    bot = %bot,
                    policy = %policy,
                    sandbox = sandbox,
                    "simulation.start"
                );
            }
            ObserverEvent::TurnCompleted {
                turn,
                commands,
                errors,
                latency,
            } => {
                info!(
                    turn = turn,
                    commands = commands,
                    errors = errors,
                    latency_ms = millis(*latency),
                    "turn.completed"
                );
            }
            ObserverEvent::SimulationEnd {
                turns,
                duration,
                score,
            } => {
                info!(
                    turns = turns,
                    duration_ms = millis(*duration),
                    score = ?score,
                    "simulation.end"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}
