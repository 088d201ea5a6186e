//! Client configuration

use serde::{Deserialize, Serialize};

use crate::error::{DiodeError, Result};

pub(crate) const API_KEY_ENVVAR_NAME: &str = "DIODE_API_KEY";
pub(crate) const SENTRY_DSN_ENVVAR_NAME: &str = "DIODE_SENTRY_DSN";

fn default_sample_rate() -> f32 {
    1.0
}

/// Diode client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiodeConfig {
    /// Ingestion endpoint
    ///
    /// Format: `grpc://hostname[:port][/path]` or `grpcs://…`
    /// Example: `grpc://localhost:8081`, `grpcs://ingest.example.com/tenant/a`
    pub target: String,

    /// Name of the producing application, forwarded with every request
    pub app_name: String,

    /// Version of the producing application
    pub app_version: String,

    /// API key; read from `DIODE_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Error-reporting DSN; read from `DIODE_SENTRY_DSN` when unset.
    /// Reporting is disabled when neither is present.
    #[serde(default)]
    pub sentry_dsn: Option<String>,

    /// Sample rate for reported transactions (0.0 - 1.0)
    #[serde(default = "default_sample_rate")]
    pub sentry_traces_sample_rate: f32,

    /// Sample rate for profiling (0.0 - 1.0)
    #[serde(default = "default_sample_rate")]
    pub sentry_profiles_sample_rate: f32,
}

impl Default for DiodeConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            app_name: String::new(),
            app_version: String::new(),
            api_key: None,
            sentry_dsn: None,
            sentry_traces_sample_rate: default_sample_rate(),
            sentry_profiles_sample_rate: default_sample_rate(),
        }
    }
}

impl DiodeConfig {
    pub fn new(
        target: impl Into<String>,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            app_name: app_name.into(),
            app_version: app_version.into(),
            ..Default::default()
        }
    }

    /// API key from the config or the environment; required.
    pub(crate) fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENVVAR_NAME).ok())
            .ok_or_else(|| {
                DiodeError::Config(format!(
                    "api_key param or {API_KEY_ENVVAR_NAME} environment variable required"
                ))
            })
    }

    /// Reporting DSN from the config or the environment; optional.
    pub(crate) fn resolve_sentry_dsn(&self) -> Option<String> {
        self.sentry_dsn
            .clone()
            .or_else(|| std::env::var(SENTRY_DSN_ENVVAR_NAME).ok())
    }
}
