use crate::api::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, Registration};
use crate::bots::PolicyKind;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File this config was read from, if any - not serialized
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Simulation endpoint; every call is a POST to this URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Event whose high score board the run is entered into
    #[serde(default = "default_event")]
    pub event: String,

    /// Building configuration to simulate (see `dianti buildings`)
    #[serde(default = "default_building")]
    pub building: String,

    /// Bot name shown on the high score board; defaults to `<policy>-rust-bot`
    #[serde(default)]
    pub bot_name: Option<String>,

    #[serde(default = "default_email")]
    pub email: String,

    /// Sandbox runs are kept out of high scores and replays
    #[serde(default)]
    pub sandbox: bool,

    #[serde(default)]
    pub policy: PolicyKind,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_event() -> String {
    "secondspace2025".into()
}

fn default_building() -> String {
    "tiny_random".into()
}

fn default_email() -> String {
    "bob@mail.com".into()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            api_url: default_api_url(),
            event: default_event(),
            building: default_building(),
            bot_name: None,
            email: default_email(),
            sandbox: false,
            policy: PolicyKind::default(),
            request_timeout_secs: default_request_timeout_secs(),
            observability: ObservabilityConfig::default(),
        }
    }
}

// ── Observability ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// "log" | "none"
    pub backend: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            backend: "log".into(),
        }
    }
}

/// `~/.dianti/config.toml`, when a home directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|u| u.home_dir().join(".dianti").join("config.toml"))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Without one, `~/.dianti/config.toml` is
    /// read if present; otherwise built-in defaults apply. Nothing is ever
    /// written back. Environment overrides are applied on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(e.to_string()))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `DIANTI_*` overrides read through `lookup`. Empty or
    /// unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get("DIANTI_API_URL") {
            self.api_url = url;
        }

        if let Some(event) = get("DIANTI_EVENT") {
            self.event = event;
        }

        if let Some(building) = get("DIANTI_BUILDING") {
            self.building = building;
        }

        if let Some(bot_name) = get("DIANTI_BOT_NAME") {
            self.bot_name = Some(bot_name);
        }

        if let Some(email) = get("DIANTI_EMAIL") {
            self.email = email;
        }

        if let Some(raw) = get("DIANTI_SANDBOX") {
            match parse_flag(&raw) {
                Some(sandbox) => self.sandbox = sandbox,
                None => tracing::warn!("Ignoring DIANTI_SANDBOX={raw}: expected true or false"),
            }
        }

        if let Some(raw) = get("DIANTI_POLICY") {
            match PolicyKind::from_str(raw.trim()) {
                Ok(policy) => self.policy = policy,
                Err(_) => tracing::warn!("Ignoring DIANTI_POLICY={raw}: unknown policy"),
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::Validation(format!("api_url '{}': {e}", self.api_url)))?;

        for (field, value) in [
            ("event", self.event.as_str()),
            ("building", self.building.as_str()),
            ("bot_name", self.bot_name.as_deref().unwrap_or("unset")),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Name to register under: the explicit `bot_name`, else one derived
    /// from the policy so each bot keeps its own scoreboard entry.
    pub fn effective_bot_name(&self) -> String {
        self.bot_name
            .clone()
            .unwrap_or_else(|| format!("{}-rust-bot", self.policy))
    }

    /// Start-request body for this config.
    pub fn registration(&self) -> Registration {
        Registration {
            bot: self.effective_bot_name(),
            building_name: self.building.clone(),
            email: self.email.clone(),
            event: self.event.clone(),
            sandbox: self.sandbox,
        }
    }
}
