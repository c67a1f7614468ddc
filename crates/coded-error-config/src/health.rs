use serde::Deserialize;

/// Liveness route served by the demo
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Mount the route at all
    pub enabled: bool,
    /// Route path, must start with `/`
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_owned(),
        }
    }
}
