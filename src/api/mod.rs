pub mod building;
pub mod client;
pub mod http_client;
pub mod types;

pub use building::{Building, BuildingProfile};
pub use client::{DEFAULT_API_URL, SessionPhase, SimulationClient};
pub use http_client::{
    DEFAULT_REQUEST_TIMEOUT_SECS, build_api_client, build_api_client_with_timeout,
};
pub use types::{
    Action, Command, Direction, ElevatorId, ElevatorStatus, PassengerRequest, Registration,
    SimulationState,
};
