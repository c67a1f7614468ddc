#![allow(clippy::must_use_candidate)]

pub mod health;
mod loader;
pub mod responder;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use health::*;
pub use responder::*;
pub use server::*;
pub use telemetry::*;

/// Top-level configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Error response configuration
    #[serde(default)]
    pub responder: ResponderConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
