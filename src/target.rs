//! Diode target string parsing
//!
//! Targets look like `grpc://localhost:8081` or
//! `grpcs://ingest.example.com/tenant/a`: the scheme selects the transport
//! security, the authority is dialed, and any path is prepended to every
//! RPC method name by the client.

use url::Url;

use crate::error::{DiodeError, Result};

/// Default port when the target does not carry one.
const DEFAULT_PORT: u16 = 443;

/// A parsed diode target: dial authority, optional request sub-path and
/// transport security flag. Derived once at client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    authority: String,
    path: String,
    tls: bool,
}

impl Target {
    /// Parse a target string.
    ///
    /// The scheme must be `grpc` (plaintext) or `grpcs` (TLS); the path is
    /// kept verbatim and empty when absent.
    pub fn parse(raw: &str) -> Result<Self> {
        let url =
            Url::parse(raw).map_err(|e| DiodeError::InvalidTarget(format!("{raw}: {e}")))?;

        let tls = match url.scheme() {
            "grpc" => false,
            "grpcs" => true,
            _ => {
                return Err(DiodeError::InvalidTarget(
                    "target should start with grpc:// or grpcs://".to_string(),
                ));
            }
        };

        let host = url
            .host_str()
            .ok_or_else(|| DiodeError::InvalidTarget(format!("{raw}: missing host")))?;

        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => format!("{host}:{DEFAULT_PORT}"),
        };

        Ok(Self {
            authority,
            path: url.path().to_string(),
            tls,
        })
    }

    /// `host:port` portion dialed by the channel.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Sub-path prepended to every RPC method name; empty when absent.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the scheme requested transport security.
    pub fn tls(&self) -> bool {
        self.tls
    }

    /// URI handed to the transport endpoint.
    pub(crate) fn endpoint_uri(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}", self.authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_authority() {
        let target = Target::parse("grpc://localhost:8081").unwrap();
        assert_eq!(target.authority(), "localhost:8081");
        assert_eq!(target.path(), "");
        assert!(!target.tls());
    }

    #[test]
    fn test_adds_default_port_if_missing() {
        let target = Target::parse("grpc://localhost").unwrap();
        assert_eq!(target.authority(), "localhost:443");
    }

    #[test]
    fn test_parses_path() {
        let target = Target::parse("grpc://localhost:8081/my/path").unwrap();
        assert_eq!(target.authority(), "localhost:8081");
        assert_eq!(target.path(), "/my/path");
    }

    #[test]
    fn test_tls_flag_for_grpcs() {
        let target = Target::parse("grpcs://ingest.example.com").unwrap();
        assert!(target.tls());
        assert_eq!(target.authority(), "ingest.example.com:443");
    }

    #[test]
    fn test_rejects_http_scheme() {
        assert!(matches!(
            Target::parse("http://localhost:8081"),
            Err(DiodeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_rejects_https_scheme() {
        assert!(matches!(
            Target::parse("https://localhost:8081"),
            Err(DiodeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        assert!(Target::parse("ftp://localhost:8081").is_err());
        assert!(Target::parse("not a url").is_err());
    }

    #[test]
    fn test_endpoint_uri_follows_tls_flag() {
        let plain = Target::parse("grpc://localhost:8081").unwrap();
        assert_eq!(plain.endpoint_uri(), "http://localhost:8081");

        let tls = Target::parse("grpcs://ingest.example.com/tenant/a").unwrap();
        assert_eq!(tls.endpoint_uri(), "https://ingest.example.com:443");
    }
}
