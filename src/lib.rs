//! # diode-sdk
//!
//! Rust client SDK for Diode, a NetBox ingestion service. Data producers
//! (discovery agents, importers) use it to push normalized inventory
//! records (devices, interfaces, IP addresses, sites, virtual machines)
//! into a central inventory store over gRPC.
//!
//! ```no_run
//! use diode_sdk::ingester::{Device, Entity};
//! use diode_sdk::{DiodeClient, DiodeConfig};
//!
//! # async fn run() -> diode_sdk::Result<()> {
//! let mut client = DiodeClient::new(DiodeConfig {
//!     target: "grpc://localhost:8081".to_string(),
//!     app_name: "my-producer".to_string(),
//!     app_version: "0.0.1".to_string(),
//!     api_key: Some("abcde".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let entities = vec![Entity::new().device(
//!     Device::new()
//!         .name("core-sw-01")
//!         .device_type("ModelX")
//!         .manufacturer("Acme")
//!         .site("DC1"),
//! )];
//!
//! let response = client.ingest(entities, None).await?;
//! println!("errors: {:?}", response.errors);
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod ingester;
pub mod intercept;
mod observability;
pub mod target;

// Re-export commonly used types
pub use client::DiodeClient;
pub use config::DiodeConfig;
pub use error::{DiodeError, Result};

/// Generated `diode.v1` protocol types.
pub use diode_proto::diode::v1 as proto;
