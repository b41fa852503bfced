pub mod schema;

pub use schema::{Config, ObservabilityConfig, default_config_path};
