use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Travel direction of an elevator or a hall call.
///
/// On the wire this is a boolean: `true` is up, `false` is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(from = "bool", into = "bool")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl From<bool> for Direction {
    fn from(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }
}

impl From<Direction> for bool {
    fn from(direction: Direction) -> Self {
        direction == Direction::Up
    }
}

/// What an elevator does this turn.
///
/// On the wire this is a boolean: `true` is move, `false` is stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(from = "bool", into = "bool")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Move,
    Stop,
}

impl From<bool> for Action {
    fn from(moving: bool) -> Self {
        if moving { Self::Move } else { Self::Stop }
    }
}

impl From<Action> for bool {
    fn from(action: Action) -> Self {
        action == Action::Move
    }
}

/// Opaque elevator identifier.
///
/// The server hands out names like `"elevator-0"`, but numeric ids are
/// accepted too and echoed back with the same JSON type they arrived with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElevatorId {
    Name(String),
    Number(i64),
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ElevatorId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ElevatorId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i64> for ElevatorId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// One elevator as reported by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    /// Current floor, 1-based. `None` when absent or not an integer.
    #[serde(default, deserialize_with = "lenient_floor")]
    pub floor: Option<i64>,
    /// Destination floors pressed by passengers riding this elevator.
    #[serde(default, deserialize_with = "lenient_list")]
    pub buttons_pressed: Vec<i64>,
    /// Server-defined fields the client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A passenger waiting on a floor for an elevator going `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PassengerRequest {
    pub floor: i64,
    pub direction: Direction,
}

// The generic client only needs elevator ids. Fields that only policies read
// degrade to "unknown" instead of failing the whole snapshot.

fn lenient_floor<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_i64))
}

/// `null` or a non-array reads as empty; entries that do not parse are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Snapshot of the simulation returned by every call.
///
/// Each response replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationState {
    pub running: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub num_floors: Option<u32>,
    #[serde(default)]
    pub elevators: Vec<ElevatorStatus>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub requests: Vec<PassengerRequest>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub replay_url: Option<String>,
    #[serde(default)]
    pub cur_turn: Option<u64>,
    #[serde(default)]
    pub num_turns: Option<u64>,
}

/// Instruction for a single elevator for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub elevator_id: ElevatorId,
    pub direction: Direction,
    pub action: Action,
}

impl Command {
    pub fn new(elevator_id: impl Into<ElevatorId>, direction: Direction, action: Action) -> Self {
        Self {
            elevator_id: elevator_id.into(),
            direction,
            action,
        }
    }
}

/// Body of the request that starts a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Bot name shown on the high score board.
    pub bot: String,
    pub building_name: String,
    /// Used for the Gravatar next to the score.
    pub email: String,
    /// Each event keeps its own high score board.
    pub event: String,
    /// Sandbox runs are excluded from high scores and replays.
    pub sandbox: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TurnRequest<'a> {
    pub token: &'a str,
    pub commands: &'a [Command],
}
