//! Request path rewriting for targets that carry a sub-path
//!
//! The method generated from the protocol buffer definition is
//! `/diode.v1.IngesterService/Ingest`. Targets may carry an extra path
//! (`grpc://localhost:8081/tenant1`); every outbound request URI is then
//! rewritten to `/tenant1/diode.v1.IngesterService/Ingest` before dispatch.

use std::task::{Context, Poll};

use http::Uri;
use http::uri::PathAndQuery;
use tower::Service;

/// Middleware that prepends a fixed sub-path to every outbound request URI.
///
/// Only the URI is touched; metadata, deadline and body pass through
/// unchanged. The client installs it only when the target carries a
/// sub-path; an empty sub-path never reaches this type.
#[derive(Debug, Clone)]
pub struct SubPathService<S> {
    inner: S,
    sub_path: String,
}

impl<S> SubPathService<S> {
    pub fn new(inner: S, sub_path: impl Into<String>) -> Self {
        Self {
            inner,
            sub_path: sub_path.into(),
        }
    }
}

impl<S, ReqBody> Service<http::Request<ReqBody>> for SubPathService<S>
where
    S: Service<http::Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<ReqBody>) -> Self::Future {
        *req.uri_mut() = prefix_uri(&self.sub_path, req.uri());
        self.inner.call(req)
    }
}

/// Rebuild `uri` with `sub_path` prepended to its path-and-query.
///
/// The sub-path comes out of an already parsed URL; if the combined path
/// still fails to reassemble the original URI is kept.
fn prefix_uri(sub_path: &str, uri: &Uri) -> Uri {
    let path_and_query = uri
        .path_and_query()
        .map(PathAndQuery::as_str)
        .unwrap_or("");

    let mut parts = uri.clone().into_parts();
    match PathAndQuery::try_from(format!("{sub_path}{path_and_query}")) {
        Ok(prefixed) => parts.path_and_query = Some(prefixed),
        Err(_) => return uri.clone(),
    }

    Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
}
