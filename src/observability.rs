//! Logging and error reporting for the SDK
//!
//! Logging goes through `tracing`; verbosity comes from the
//! `DIODE_SDK_LOG_LEVEL` environment variable (default `info`). Error
//! reporting is optional and only active when a DSN is configured; it is
//! observational and never alters SDK control flow.

use tracing_subscriber::filter::EnvFilter;

use crate::error::{DiodeError, Result};

pub(crate) const LOG_LEVEL_ENVVAR_NAME: &str = "DIODE_SDK_LOG_LEVEL";

/// Install a global tracing subscriber filtered by `DIODE_SDK_LOG_LEVEL`.
///
/// A subscriber already installed by the embedding application wins.
pub(crate) fn init_logging() {
    let directive = std::env::var(LOG_LEVEL_ENVVAR_NAME)
        .ok()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Fixed tag set registered once when reporting is enabled.
pub(crate) struct ReportingTags<'a> {
    pub target: &'a str,
    pub path: &'a str,
    pub app_name: &'a str,
    pub app_version: &'a str,
    pub sdk_version: &'a str,
    pub platform: &'a str,
    pub rust_version: &'a str,
}

/// Initialize the reporting client and register the fixed tags.
///
/// The returned guard must be held for the lifetime of the session;
/// dropping it flushes and shuts the reporting client down.
pub(crate) fn init_reporting(
    dsn: &str,
    traces_sample_rate: f32,
    tags: &ReportingTags<'_>,
) -> Result<sentry::ClientInitGuard> {
    let dsn = dsn
        .parse::<sentry::types::Dsn>()
        .map_err(|e| DiodeError::Config(format!("invalid reporting DSN: {e}")))?;

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: Some(tags.sdk_version.to_string().into()),
        traces_sample_rate,
        ..Default::default()
    });

    sentry::configure_scope(|scope| {
        scope.set_tag("target", tags.target);
        scope.set_tag("path", if tags.path.is_empty() { "/" } else { tags.path });
        scope.set_tag("app_name", tags.app_name);
        scope.set_tag("app_version", tags.app_version);
        scope.set_tag("sdk_version", tags.sdk_version);
        scope.set_tag("platform", tags.platform);
        scope.set_tag("rust_version", tags.rust_version);
    });

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_invalid_dsn_is_config_error() {
        let tags = ReportingTags {
            target: "localhost:8081",
            path: "",
            app_name: "my-producer",
            app_version: "0.0.1",
            sdk_version: "0.1.1",
            platform: "linux-x86_64",
            rust_version: "1.88",
        };
        let err = init_reporting("not a dsn", 1.0, &tags).map(|_| ()).unwrap_err();
        assert!(matches!(err, DiodeError::Config(_)));
    }
}
