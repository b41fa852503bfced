use std::time::Duration;

/// Events the observer can record
#[derive(Debug, Clone)]
pub enum ObserverEvent {
    SimulationStart {
        event: String,
        building: String,
        bot: String,
        policy: String,
        sandbox: bool,
    },
    TurnCompleted {
        turn: u64,
        commands: usize,
        errors: usize,
        latency: Duration,
    },
    SimulationEnd {
        turns: u64,
        duration: Duration,
        score: Option<f64>,
    },
}

/// Core observability trait — implement for any backend
pub trait Observer: Send + Sync {
    /// Record a discrete event
    fn record_event(&self, event: &ObserverEvent);

    /// Flush any buffered data (no-op for most backends)
    fn flush(&self) {}

    /// Human-readable name of this observer
    fn name(&self) -> &str;
}
