use super::{Policy, TurnContext};
use crate::api::{Action, Command, Direction, ElevatorId, ElevatorStatus, SimulationState};
use std::collections::HashMap;

/// Sweeps each elevator between the ground and top floor.
///
/// An elevator heads up until it reaches the top floor, then down until it
/// reaches floor 1. It stops when a rider wants the current floor or a hall
/// call on the current floor points the way it is travelling.
#[derive(Debug, Default)]
pub struct UpDownBot {
    directions: HashMap<ElevatorId, Direction>,
}

impl UpDownBot {
    pub fn new() -> Self {
        Self::default()
    }

    fn direction_for(&mut self, elevator: &ElevatorStatus, num_floors: u32) -> Direction {
        let current = self
            .directions
            .get(&elevator.id)
            .copied()
            .unwrap_or(Direction::Up);
        let top = i64::from(num_floors);
        let next = match (current, elevator.floor) {
            (Direction::Up, Some(floor)) if floor >= top => Direction::Down,
            (Direction::Down, Some(floor)) if floor <= 1 => Direction::Up,
            _ => current,
        };
        self.directions.insert(elevator.id.clone(), next);
        next
    }
}

fn should_stop(state: &SimulationState, elevator: &ElevatorStatus, direction: Direction) -> bool {
    let Some(floor) = elevator.floor else {
        return false;
    };
    elevator.buttons_pressed.contains(&floor)
        || state
            .requests
            .iter()
            .any(|request| request.floor == floor && request.direction == direction)
}

impl Policy for UpDownBot {
    fn decide(&mut self, state: &SimulationState, ctx: TurnContext) -> Vec<Command> {
        let num_floors = state.num_floors.unwrap_or(ctx.num_floors);
        state
            .elevators
            .iter()
            .map(|elevator| {
                let direction = self.direction_for(elevator, num_floors);
                let action = if should_stop(state, elevator, direction) {
                    Action::Stop
                } else {
                    Action::Move
                };
                Command::new(elevator.id.clone(), direction, action)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "updown"
    }
}
