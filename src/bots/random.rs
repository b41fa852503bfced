use super::{Policy, TurnContext};
use crate::api::{Action, Command, Direction, SimulationState};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Picks direction and action uniformly at random, independently for every
/// elevator on every turn.
pub struct RandomBot<R = ThreadRng> {
    rng: R,
}

impl RandomBot<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl RandomBot<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Policy for RandomBot<R> {
    fn decide(&mut self, state: &SimulationState, _ctx: TurnContext) -> Vec<Command> {
        state
            .elevators
            .iter()
            .map(|elevator| {
                let direction = Direction::from(self.rng.random::<bool>());
                let action = Action::from(self.rng.random::<bool>());
                Command::new(elevator.id.clone(), direction, action)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}
