use serde::Deserialize;

/// How error responses are reported
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Log every error response
    #[serde(default = "default_log_errors")]
    pub log_errors: bool,
    /// Include captured frames and public messages in logged errors
    #[serde(default)]
    pub verbose_logs: bool,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            log_errors: true,
            verbose_logs: false,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_log_errors() -> bool {
    true
}
