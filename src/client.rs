//! Diode ingestion client
//!
//! The client owns a lazily-connected gRPC channel to the configured
//! target. Construction only validates configuration and sets the channel
//! up; the first network round-trip happens on [`DiodeClient::ingest`].

use tonic::metadata::AsciiMetadataValue;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::debug;
use uuid::Uuid;

use crate::config::DiodeConfig;
use crate::error::{DiodeError, Result};
use crate::intercept::SubPathService;
use crate::observability::{self, ReportingTags};
use crate::target::Target;
use diode_proto::diode::v1::ingester_service_client::IngesterServiceClient;
use diode_proto::diode::v1::{Entity, IngestRequest, IngestResponse};

pub(crate) const SDK_NAME: &str = "diode-sdk-rust";
pub(crate) const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");
const DEFAULT_STREAM: &str = "latest";

/// The ingester stub, with the sub-path rewrite installed only when the
/// target carries one.
enum IngesterStub {
    Direct(IngesterServiceClient<Channel>),
    Prefixed(IngesterServiceClient<SubPathService<Channel>>),
}

/// Diode ingestion client
///
/// Cheap to share by reference: `ingest` takes `&self` and clones the
/// underlying stub per call, so concurrent calls multiplex over the same
/// channel. `close()` releases the channel; afterwards every `ingest`
/// fails with [`DiodeError::Closed`].
pub struct DiodeClient {
    target: Target,
    app_name: String,
    app_version: String,
    platform: String,
    api_key: AsciiMetadataValue,
    platform_header: AsciiMetadataValue,
    rust_version_header: AsciiMetadataValue,
    stub: Option<IngesterStub>,
    _reporting: Option<sentry::ClientInitGuard>,
}

impl std::fmt::Debug for DiodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiodeClient")
            .field("target", &self.target)
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .field("platform", &self.platform)
            .field("connected", &self.stub.is_some())
            .finish_non_exhaustive()
    }
}

impl DiodeClient {
    /// Create a new client from the given configuration.
    ///
    /// Fails with a configuration error before any channel is set up when
    /// the API key is missing (or unusable as a metadata value), and with
    /// an invalid-target error when the target string does not parse.
    ///
    /// Must be called within a Tokio runtime: the lazy channel registers
    /// its background worker with the current runtime.
    pub fn new(config: DiodeConfig) -> Result<Self> {
        observability::init_logging();

        let target = Target::parse(&config.target)?;
        let api_key = config.resolve_api_key()?;

        let platform = format!(
            "{}-{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        );

        let api_key = AsciiMetadataValue::try_from(api_key.as_str())
            .map_err(|_| DiodeError::Config("api_key is not valid ASCII".to_string()))?;
        let platform_header = AsciiMetadataValue::try_from(platform.as_str())
            .map_err(|_| DiodeError::Config("platform string is not valid ASCII".to_string()))?;
        let rust_version_header = AsciiMetadataValue::from_static(RUST_VERSION);

        let channel = Self::open_channel(&target)?;

        let stub = if target.path().is_empty() {
            IngesterStub::Direct(IngesterServiceClient::new(channel))
        } else {
            debug!("Setting up sub-path rewrite for: {}", target.path());
            IngesterStub::Prefixed(IngesterServiceClient::new(SubPathService::new(
                channel,
                target.path(),
            )))
        };

        let reporting = match config.resolve_sentry_dsn() {
            Some(dsn) => {
                debug!("Setting up error reporting");
                let tags = ReportingTags {
                    target: target.authority(),
                    path: target.path(),
                    app_name: &config.app_name,
                    app_version: &config.app_version,
                    sdk_version: SDK_VERSION,
                    platform: &platform,
                    rust_version: RUST_VERSION,
                };
                Some(observability::init_reporting(
                    &dsn,
                    config.sentry_traces_sample_rate,
                    &tags,
                )?)
            }
            None => None,
        };

        Ok(Self {
            target,
            app_name: config.app_name,
            app_version: config.app_version,
            platform,
            api_key,
            platform_header,
            rust_version_header,
            stub: Some(stub),
            _reporting: reporting,
        })
    }

    fn open_channel(target: &Target) -> Result<Channel> {
        let mut endpoint = Endpoint::from_shared(target.endpoint_uri())?;

        if target.tls() {
            debug!("Setting up TLS gRPC channel");
            endpoint = endpoint.tls_config(ClientTlsConfig::new().with_webpki_roots())?;
        } else {
            debug!("Setting up plaintext gRPC channel");
        }

        Ok(endpoint.connect_lazy())
    }

    /// SDK name sent with every request.
    pub fn name(&self) -> &str {
        SDK_NAME
    }

    /// SDK version sent with every request.
    pub fn version(&self) -> &str {
        SDK_VERSION
    }

    /// Authority (`host:port`) the channel dials.
    pub fn target(&self) -> &str {
        self.target.authority()
    }

    /// Sub-path prepended to every RPC method name; empty when absent.
    pub fn path(&self) -> &str {
        self.target.path()
    }

    /// Whether the channel uses TLS.
    pub fn tls_verify(&self) -> bool {
        self.target.tls()
    }

    /// Producing application name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Producing application version.
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Host platform string sent as call metadata.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Release the channel. Idempotent; later `ingest` calls fail with
    /// [`DiodeError::Closed`].
    pub fn close(&mut self) {
        if self.stub.take().is_some() {
            debug!("Diode channel closed");
        }
    }

    /// Push entities onto the given stream (`"latest"` when `None`).
    ///
    /// One round-trip per call: a fresh request id is generated, the fixed
    /// identity metadata is attached, and any transport failure surfaces
    /// as [`DiodeError::Client`] after exactly one attempt.
    pub async fn ingest<I, E>(&self, entities: I, stream: Option<&str>) -> Result<IngestResponse>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entity>,
    {
        let stub = self.stub.as_ref().ok_or(DiodeError::Closed)?;

        let request = IngestRequest {
            stream: stream.unwrap_or(DEFAULT_STREAM).to_string(),
            entities: entities.into_iter().map(Into::into).collect(),
            id: Uuid::new_v4().to_string(),
            producer_app_name: self.app_name.clone(),
            producer_app_version: self.app_version.clone(),
            sdk_name: SDK_NAME.to_string(),
            sdk_version: SDK_VERSION.to_string(),
        };

        debug!(
            id = %request.id,
            stream = %request.stream,
            entities = request.entities.len(),
            "Sending ingest request"
        );

        let mut request = tonic::Request::new(request);
        let metadata = request.metadata_mut();
        metadata.insert("diode-api-key", self.api_key.clone());
        metadata.insert("platform", self.platform_header.clone());
        metadata.insert("rust-version", self.rust_version_header.clone());

        let response = match stub {
            IngesterStub::Direct(client) => {
                let mut client = client.clone();
                client.ingest(request).await?
            }
            IngesterStub::Prefixed(client) => {
                let mut client = client.clone();
                client.ingest(request).await?
            }
        };

        Ok(response.into_inner())
    }
}
