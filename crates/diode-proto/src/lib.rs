//! Diode Protocol Buffer Definitions
//!
//! This crate contains the generated `diode.v1` ingestion types: the entity
//! messages, the request/response envelope and the `IngesterService` stubs.
//!
//! # Usage
//!
//! ## Direct module access
//!
//! ```ignore
//! use diode_proto::diode::v1::{Device, Entity, IngestRequest};
//! ```
//!
//! ## Convenience re-exports
//!
//! Common types are re-exported at the crate root:
//!
//! ```ignore
//! use diode_proto::{Entity, IngestRequest, IngesterServiceClient};
//! ```

/// Diode ingestion protocol definitions.
pub mod diode {
    pub mod v1 {
        tonic::include_proto!("diode.v1");
    }
}

// ============================================================================
// Re-exports: entity messages
// ============================================================================

pub use diode::v1::{
    Cluster,
    ClusterGroup,
    ClusterType,
    Device,
    DeviceType,
    Entity,
    IpAddress,
    Interface,
    Manufacturer,
    Platform,
    Prefix,
    Role,
    Site,
    Tag,
    VirtualDisk,
    VirtualMachine,
    VmInterface,
};

// ============================================================================
// Re-exports: ingestion envelope, client and server
// ============================================================================

pub use diode::v1::{
    IngestRequest,
    IngestResponse,
    ingester_service_client::IngesterServiceClient,
    ingester_service_server::{IngesterService, IngesterServiceServer},
};
