use super::http_client::build_api_client;
use super::types::{Command, Registration, SimulationState, TurnRequest};
use crate::error::ApiError;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://dianti.secondspace.dev/api";

/// Longest slice of an error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    NotStarted,
    Active,
    Ended,
}

/// Client for one simulation run.
///
/// A run is started exactly once with [`SimulationClient::start`] and then
/// advanced with [`SimulationClient::send`] until the server reports that
/// it is no longer running. Playing again needs a fresh client.
pub struct SimulationClient {
    api_url: String,
    client: Client,
    phase: SessionPhase,
    token: Option<String>,
    num_floors: u32,
    cur_turn: u64,
}

impl SimulationClient {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(api_url, build_api_client())
    }

    pub fn with_client(api_url: &str, client: Client) -> Self {
        Self {
            api_url: api_url.to_string(),
            client,
            phase: SessionPhase::NotStarted,
            token: None,
            num_floors: 0,
            cur_turn: 0,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Session token issued by the server, once started.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Number of floors reported at start; 0 before that.
    pub fn num_floors(&self) -> u32 {
        self.num_floors
    }

    /// Turns submitted so far.
    pub fn cur_turn(&self) -> u64 {
        self.cur_turn
    }

    pub async fn start(
        &mut self,
        registration: &Registration,
    ) -> Result<SimulationState, ApiError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(ApiError::AlreadyStarted);
        }

        let state = self.post(registration).await?;
        let token = state
            .token
            .clone()
            .ok_or_else(|| ApiError::Protocol("start response is missing `token`".into()))?;
        let num_floors = state
            .num_floors
            .ok_or_else(|| ApiError::Protocol("start response is missing `num_floors`".into()))?;

        self.token = Some(token);
        self.num_floors = num_floors;
        self.cur_turn = 0;
        self.phase = if state.running {
            SessionPhase::Active
        } else {
            SessionPhase::Ended
        };

        info!(
            building = %registration.building_name,
            bot = %registration.bot,
            num_floors,
            elevators = state.elevators.len(),
            sandbox = registration.sandbox,
            "simulation started"
        );
        surface_errors(0, &state.errors);
        Ok(state)
    }

    pub async fn send(&mut self, commands: &[Command]) -> Result<SimulationState, ApiError> {
        match self.phase {
            SessionPhase::NotStarted => return Err(ApiError::NotStarted),
            SessionPhase::Ended => return Err(ApiError::Ended),
            SessionPhase::Active => {}
        }
        let Some(token) = self.token.as_deref() else {
            return Err(ApiError::NotStarted);
        };

        self.cur_turn += 1;
        debug!(turn = self.cur_turn, commands = commands.len(), "submitting turn");

        let state = self.post(&TurnRequest { token, commands }).await?;
        surface_errors(self.cur_turn, &state.errors);

        if !state.running {
            self.phase = SessionPhase::Ended;
            debug!(turn = self.cur_turn, "server reported the simulation finished");
        }
        Ok(state)
    }

    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<SimulationState, ApiError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(body)
            .send()
            .await
            .map_err(|source| self.connection_error(source))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| self.connection_error(source))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Protocol(e.to_string()))
    }

    fn connection_error(&self, source: reqwest::Error) -> ApiError {
        ApiError::Connection {
            url: self.api_url.clone(),
            source,
        }
    }
}

/// Simulation-level errors never end the run; they are only reported.
fn surface_errors(turn: u64, errors: &[String]) {
    for error in errors {
        warn!(turn, "simulation error: {error}");
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}
