//! Builders for diode entity messages
//!
//! The generated protobuf types reference other inventory objects as full
//! messages, but discovery code usually has only a name ("Acme", "DC1").
//! Each builder therefore accepts a reference either as a bare name or as
//! an already built message, and fills in nested messages itself, seeding
//! manufacturer and site values into children that do not carry their own.
//!
//! ```
//! use diode_sdk::ingester::{Device, Entity};
//!
//! let entity = Entity::new().device(
//!     Device::new()
//!         .name("core-sw-01")
//!         .device_type("ModelX")
//!         .manufacturer("Acme")
//!         .site("DC1"),
//! );
//! let _ = entity.build();
//! ```

use diode_proto::diode::v1 as pb;
use prost_types::Timestamp;

/// A reference to another inventory object: either a bare name used to
/// build a minimal message, or an already built message used as-is.
///
/// Anything that goes into a reference field converts into this type:
/// `&str`/`String` give the name form, while generated messages and the
/// builders in this module give the built form.
#[derive(Debug, Clone)]
pub enum Reference<T> {
    Name(String),
    Built(T),
}

impl<T> From<&str> for Reference<T> {
    fn from(name: &str) -> Self {
        Reference::Name(name.to_string())
    }
}

impl<T> From<String> for Reference<T> {
    fn from(name: String) -> Self {
        Reference::Name(name)
    }
}

/// Builds the minimal message for a bare-name reference; the field the
/// name lands in differs per message (`model`, `address`, `prefix`, …).
trait FromName {
    fn from_name(name: String) -> Self;
}

impl<T: FromName> Reference<T> {
    /// Turn the reference into a full message.
    fn resolve(self) -> T {
        match self {
            Reference::Name(name) => T::from_name(name),
            Reference::Built(message) => message,
        }
    }
}

macro_rules! named_by {
    ($($message:ty => $field:ident),* $(,)?) => {$(
        impl FromName for $message {
            fn from_name(name: String) -> Self {
                Self {
                    $field: Some(name),
                    ..Default::default()
                }
            }
        }
    )*};
}

named_by!(
    pb::Tag => name,
    pb::Manufacturer => name,
    pb::Platform => name,
    pb::Role => name,
    pb::DeviceType => model,
    pb::Device => name,
    pb::Interface => name,
    pb::IpAddress => address,
    pb::Prefix => prefix,
    pb::Site => name,
    pb::ClusterGroup => name,
    pb::ClusterType => name,
    pb::Cluster => name,
    pb::VirtualMachine => name,
    pb::VirtualDisk => name,
    pb::VmInterface => name,
);

macro_rules! string_setters {
    ($($field:ident),* $(,)?) => {$(
        pub fn $field(mut self, $field: impl Into<String>) -> Self {
            self.$field = Some($field.into());
            self
        }
    )*};
}

macro_rules! scalar_setters {
    ($($field:ident: $ty:ty),* $(,)?) => {$(
        pub fn $field(mut self, $field: $ty) -> Self {
            self.$field = Some($field);
            self
        }
    )*};
}

macro_rules! reference_setters {
    ($($field:ident: $message:ty),* $(,)?) => {$(
        pub fn $field(mut self, $field: impl Into<Reference<$message>>) -> Self {
            self.$field = Some($field.into());
            self
        }
    )*};
}

macro_rules! tags_setter {
    () => {
        /// Plain names become name-only tags; built tags pass through.
        pub fn tags<I, T>(mut self, tags: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<Reference<pb::Tag>>,
        {
            self.tags = tags.into_iter().map(|tag| tag.into().resolve()).collect();
            self
        }
    };
}

/// Builder for [`pb::Tag`].
#[derive(Debug, Clone, Default)]
pub struct Tag {
    name: Option<String>,
    slug: Option<String>,
    color: Option<String>,
}

impl Tag {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, color);

    pub fn build(self) -> pb::Tag {
        pb::Tag {
            name: self.name,
            slug: self.slug,
            color: self.color,
        }
    }
}

/// Builder for [`pb::Manufacturer`].
#[derive(Debug, Clone, Default)]
pub struct Manufacturer {
    name: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Manufacturer {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, description);
    tags_setter!();

    pub fn build(self) -> pb::Manufacturer {
        pb::Manufacturer {
            name: self.name,
            slug: self.slug,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Platform`].
#[derive(Debug, Clone, Default)]
pub struct Platform {
    name: Option<String>,
    slug: Option<String>,
    manufacturer: Option<Reference<pb::Manufacturer>>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, description);
    reference_setters!(manufacturer: pb::Manufacturer);
    tags_setter!();

    pub fn build(self) -> pb::Platform {
        pb::Platform {
            name: self.name,
            slug: self.slug,
            manufacturer: self.manufacturer.map(Reference::resolve),
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Role`].
#[derive(Debug, Clone, Default)]
pub struct Role {
    name: Option<String>,
    slug: Option<String>,
    color: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Role {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, color, description);
    tags_setter!();

    pub fn build(self) -> pb::Role {
        pb::Role {
            name: self.name,
            slug: self.slug,
            color: self.color,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::DeviceType`].
#[derive(Debug, Clone, Default)]
pub struct DeviceType {
    model: Option<String>,
    slug: Option<String>,
    manufacturer: Option<Reference<pb::Manufacturer>>,
    description: Option<String>,
    comments: Option<String>,
    part_number: Option<String>,
    tags: Vec<pb::Tag>,
}

impl DeviceType {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(model, slug, description, comments, part_number);
    reference_setters!(manufacturer: pb::Manufacturer);
    tags_setter!();

    pub fn build(self) -> pb::DeviceType {
        pb::DeviceType {
            model: self.model,
            slug: self.slug,
            manufacturer: self.manufacturer.map(Reference::resolve),
            description: self.description,
            comments: self.comments,
            part_number: self.part_number,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Device`].
///
/// `manufacturer` is not a device field itself; it seeds the nested
/// `platform` and `device_type` when those do not carry their own
/// manufacturer. An explicitly set manufacturer on a child is never
/// overwritten.
#[derive(Debug, Clone, Default)]
pub struct Device {
    name: Option<String>,
    device_fqdn: Option<String>,
    device_type: Option<Reference<pb::DeviceType>>,
    role: Option<Reference<pb::Role>>,
    platform: Option<Reference<pb::Platform>>,
    serial: Option<String>,
    site: Option<Reference<pb::Site>>,
    asset_tag: Option<String>,
    status: Option<String>,
    description: Option<String>,
    comments: Option<String>,
    primary_ip4: Option<Reference<pb::IpAddress>>,
    primary_ip6: Option<Reference<pb::IpAddress>>,
    manufacturer: Option<Reference<pb::Manufacturer>>,
    tags: Vec<pb::Tag>,
}

impl Device {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(
        name,
        device_fqdn,
        serial,
        asset_tag,
        status,
        description,
        comments,
    );
    reference_setters!(
        device_type: pb::DeviceType,
        role: pb::Role,
        platform: pb::Platform,
        site: pb::Site,
        primary_ip4: pb::IpAddress,
        primary_ip6: pb::IpAddress,
        manufacturer: pb::Manufacturer,
    );
    tags_setter!();

    pub fn build(self) -> pb::Device {
        let manufacturer = self.manufacturer.map(Reference::resolve);

        let mut platform = self.platform.map(Reference::resolve);
        if let Some(platform) = platform.as_mut()
            && platform.manufacturer.is_none()
        {
            platform.manufacturer = manufacturer.clone();
        }

        let site = self.site.map(Reference::resolve);

        let mut device_type = self.device_type.map(Reference::resolve);
        if let Some(device_type) = device_type.as_mut()
            && device_type.manufacturer.is_none()
        {
            device_type.manufacturer = manufacturer.clone();
        }

        pb::Device {
            name: self.name,
            device_fqdn: self.device_fqdn,
            device_type,
            role: self.role.map(Reference::resolve),
            platform,
            serial: self.serial,
            site,
            asset_tag: self.asset_tag,
            status: self.status,
            description: self.description,
            comments: self.comments,
            primary_ip4: self.primary_ip4.map(|ip| Box::new(ip.resolve())),
            primary_ip6: self.primary_ip6.map(|ip| Box::new(ip.resolve())),
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Interface`].
///
/// `device_type`, `role`, `platform`, `manufacturer` and `site` are not
/// interface fields; they seed a device given as a bare name. A pre-built
/// device passes through untouched.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    name: Option<String>,
    device: Option<Reference<pb::Device>>,
    device_type: Option<Reference<pb::DeviceType>>,
    role: Option<Reference<pb::Role>>,
    platform: Option<Reference<pb::Platform>>,
    manufacturer: Option<Reference<pb::Manufacturer>>,
    site: Option<Reference<pb::Site>>,
    r#type: Option<String>,
    enabled: Option<bool>,
    mtu: Option<i32>,
    mac_address: Option<String>,
    speed: Option<i32>,
    wwn: Option<String>,
    mgmt_only: Option<bool>,
    description: Option<String>,
    mark_connected: Option<bool>,
    mode: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, r#type, mac_address, wwn, description, mode);
    scalar_setters!(
        enabled: bool,
        mtu: i32,
        speed: i32,
        mgmt_only: bool,
        mark_connected: bool,
    );
    reference_setters!(
        device: pb::Device,
        device_type: pb::DeviceType,
        role: pb::Role,
        platform: pb::Platform,
        manufacturer: pb::Manufacturer,
        site: pb::Site,
    );
    tags_setter!();

    pub fn build(self) -> pb::Interface {
        let manufacturer = self.manufacturer.map(Reference::resolve);

        let mut platform = self.platform.map(Reference::resolve);
        if let Some(platform) = platform.as_mut()
            && platform.manufacturer.is_none()
        {
            platform.manufacturer = manufacturer.clone();
        }

        let site = self.site.map(Reference::resolve);

        let mut device_type = self.device_type.map(Reference::resolve);
        if let Some(device_type) = device_type.as_mut()
            && device_type.manufacturer.is_none()
        {
            device_type.manufacturer = manufacturer.clone();
        }

        let role = self.role.map(Reference::resolve);

        let device = self.device.map(|device| match device {
            Reference::Name(name) => pb::Device {
                name: Some(name),
                device_type,
                platform,
                site,
                role,
                ..Default::default()
            },
            Reference::Built(device) => device,
        });

        pb::Interface {
            name: self.name,
            device: device.map(Box::new),
            r#type: self.r#type,
            enabled: self.enabled,
            mtu: self.mtu,
            mac_address: self.mac_address,
            speed: self.speed,
            wwn: self.wwn,
            mgmt_only: self.mgmt_only,
            description: self.description,
            mark_connected: self.mark_connected,
            mode: self.mode,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::IpAddress`].
///
/// `device`, `device_type`, `device_role`, `platform`, `manufacturer` and
/// `site` seed an interface given as a bare name (via its device); `role`
/// is the address role string and stays on the message.
#[derive(Debug, Clone, Default)]
pub struct IpAddress {
    address: Option<String>,
    interface: Option<Reference<pb::Interface>>,
    device: Option<Reference<pb::Device>>,
    device_type: Option<Reference<pb::DeviceType>>,
    device_role: Option<Reference<pb::Role>>,
    platform: Option<Reference<pb::Platform>>,
    manufacturer: Option<Reference<pb::Manufacturer>>,
    site: Option<Reference<pb::Site>>,
    status: Option<String>,
    role: Option<String>,
    dns_name: Option<String>,
    description: Option<String>,
    comments: Option<String>,
    tags: Vec<pb::Tag>,
}

impl IpAddress {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(address, status, role, dns_name, description, comments);
    reference_setters!(
        interface: pb::Interface,
        device: pb::Device,
        device_type: pb::DeviceType,
        device_role: pb::Role,
        platform: pb::Platform,
        manufacturer: pb::Manufacturer,
        site: pb::Site,
    );
    tags_setter!();

    pub fn build(self) -> pb::IpAddress {
        let manufacturer = self.manufacturer.map(Reference::resolve);

        let mut platform = self.platform.map(Reference::resolve);
        if let Some(platform) = platform.as_mut()
            && platform.manufacturer.is_none()
        {
            platform.manufacturer = manufacturer.clone();
        }

        let site = self.site.map(Reference::resolve);

        let mut device_type = self.device_type.map(Reference::resolve);
        if let Some(device_type) = device_type.as_mut()
            && device_type.manufacturer.is_none()
        {
            device_type.manufacturer = manufacturer.clone();
        }

        let device_role = self.device_role.map(Reference::resolve);

        let device = self.device.map(|device| match device {
            Reference::Name(name) => pb::Device {
                name: Some(name),
                device_type,
                platform,
                site,
                role: device_role,
                ..Default::default()
            },
            Reference::Built(device) => device,
        });

        let interface = self.interface.map(|interface| match interface {
            Reference::Name(name) => pb::Interface {
                name: Some(name),
                device: device.map(Box::new),
                ..Default::default()
            },
            Reference::Built(interface) => interface,
        });

        pb::IpAddress {
            address: self.address,
            interface: interface.map(Box::new),
            status: self.status,
            role: self.role,
            dns_name: self.dns_name,
            description: self.description,
            comments: self.comments,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Prefix`].
#[derive(Debug, Clone, Default)]
pub struct Prefix {
    prefix: Option<String>,
    site: Option<Reference<pb::Site>>,
    status: Option<String>,
    is_pool: Option<bool>,
    mark_utilized: Option<bool>,
    description: Option<String>,
    comments: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Prefix {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(prefix, status, description, comments);
    scalar_setters!(is_pool: bool, mark_utilized: bool);
    reference_setters!(site: pb::Site);
    tags_setter!();

    pub fn build(self) -> pb::Prefix {
        pb::Prefix {
            prefix: self.prefix,
            site: self.site.map(Reference::resolve),
            status: self.status,
            is_pool: self.is_pool,
            mark_utilized: self.mark_utilized,
            description: self.description,
            comments: self.comments,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Site`].
#[derive(Debug, Clone, Default)]
pub struct Site {
    name: Option<String>,
    slug: Option<String>,
    status: Option<String>,
    facility: Option<String>,
    time_zone: Option<String>,
    description: Option<String>,
    comments: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, status, facility, time_zone, description, comments);
    tags_setter!();

    pub fn build(self) -> pb::Site {
        pb::Site {
            name: self.name,
            slug: self.slug,
            status: self.status,
            facility: self.facility,
            time_zone: self.time_zone,
            description: self.description,
            comments: self.comments,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::ClusterGroup`].
#[derive(Debug, Clone, Default)]
pub struct ClusterGroup {
    name: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl ClusterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, description);
    tags_setter!();

    pub fn build(self) -> pb::ClusterGroup {
        pb::ClusterGroup {
            name: self.name,
            slug: self.slug,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::ClusterType`].
#[derive(Debug, Clone, Default)]
pub struct ClusterType {
    name: Option<String>,
    slug: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl ClusterType {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, slug, description);
    tags_setter!();

    pub fn build(self) -> pb::ClusterType {
        pb::ClusterType {
            name: self.name,
            slug: self.slug,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::Cluster`].
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    name: Option<String>,
    group: Option<Reference<pb::ClusterGroup>>,
    r#type: Option<Reference<pb::ClusterType>>,
    site: Option<Reference<pb::Site>>,
    status: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, status, description);
    reference_setters!(
        group: pb::ClusterGroup,
        r#type: pb::ClusterType,
        site: pb::Site,
    );
    tags_setter!();

    pub fn build(self) -> pb::Cluster {
        pb::Cluster {
            name: self.name,
            group: self.group.map(Reference::resolve),
            r#type: self.r#type.map(Reference::resolve),
            site: self.site.map(Reference::resolve),
            status: self.status,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::VirtualMachine`].
///
/// A cluster without its own site inherits the virtual machine's site;
/// a bare-name device is seeded with the VM's platform, site and role.
#[derive(Debug, Clone, Default)]
pub struct VirtualMachine {
    name: Option<String>,
    status: Option<String>,
    site: Option<Reference<pb::Site>>,
    cluster: Option<Reference<pb::Cluster>>,
    role: Option<Reference<pb::Role>>,
    device: Option<Reference<pb::Device>>,
    platform: Option<Reference<pb::Platform>>,
    primary_ip4: Option<Reference<pb::IpAddress>>,
    primary_ip6: Option<Reference<pb::IpAddress>>,
    vcpus: Option<i32>,
    memory: Option<i32>,
    disk: Option<i32>,
    description: Option<String>,
    comments: Option<String>,
    tags: Vec<pb::Tag>,
}

impl VirtualMachine {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, status, description, comments);
    scalar_setters!(vcpus: i32, memory: i32, disk: i32);
    reference_setters!(
        site: pb::Site,
        cluster: pb::Cluster,
        role: pb::Role,
        device: pb::Device,
        platform: pb::Platform,
        primary_ip4: pb::IpAddress,
        primary_ip6: pb::IpAddress,
    );
    tags_setter!();

    pub fn build(self) -> pb::VirtualMachine {
        let site = self.site.map(Reference::resolve);

        let mut cluster = self.cluster.map(Reference::resolve);
        if let Some(cluster) = cluster.as_mut()
            && cluster.site.is_none()
        {
            cluster.site = site.clone();
        }

        let role = self.role.map(Reference::resolve);
        let platform = self.platform.map(Reference::resolve);

        let device = self.device.map(|device| match device {
            Reference::Name(name) => pb::Device {
                name: Some(name),
                platform: platform.clone(),
                site: site.clone(),
                role: role.clone(),
                ..Default::default()
            },
            Reference::Built(device) => device,
        });

        pb::VirtualMachine {
            name: self.name,
            status: self.status,
            site,
            cluster,
            role,
            device,
            platform,
            primary_ip4: self.primary_ip4.map(Reference::resolve),
            primary_ip6: self.primary_ip6.map(Reference::resolve),
            vcpus: self.vcpus,
            memory: self.memory,
            disk: self.disk,
            description: self.description,
            comments: self.comments,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::VirtualDisk`].
#[derive(Debug, Clone, Default)]
pub struct VirtualDisk {
    name: Option<String>,
    virtual_machine: Option<Reference<pb::VirtualMachine>>,
    size: Option<i32>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl VirtualDisk {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, description);
    scalar_setters!(size: i32);
    reference_setters!(virtual_machine: pb::VirtualMachine);
    tags_setter!();

    pub fn build(self) -> pb::VirtualDisk {
        pb::VirtualDisk {
            name: self.name,
            virtual_machine: self.virtual_machine.map(Reference::resolve),
            size: self.size,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Builder for [`pb::VmInterface`].
#[derive(Debug, Clone, Default)]
pub struct VmInterface {
    name: Option<String>,
    virtual_machine: Option<Reference<pb::VirtualMachine>>,
    enabled: Option<bool>,
    mtu: Option<i32>,
    mac_address: Option<String>,
    description: Option<String>,
    tags: Vec<pb::Tag>,
}

impl VmInterface {
    pub fn new() -> Self {
        Self::default()
    }

    string_setters!(name, mac_address, description);
    scalar_setters!(enabled: bool, mtu: i32);
    reference_setters!(virtual_machine: pb::VirtualMachine);
    tags_setter!();

    pub fn build(self) -> pb::VmInterface {
        pb::VmInterface {
            name: self.name,
            virtual_machine: self.virtual_machine.map(Reference::resolve),
            enabled: self.enabled,
            mtu: self.mtu,
            mac_address: self.mac_address,
            description: self.description,
            tags: self.tags,
        }
    }
}

macro_rules! entity_setters {
    ($($field:ident: $message:ty => $variant:ident),* $(,)?) => {$(
        pub fn $field(mut self, $field: impl Into<Reference<$message>>) -> Self {
            self.entity = Some(pb::entity::Entity::$variant($field.into().resolve()));
            self
        }
    )*};
}

/// Builder for [`pb::Entity`], the envelope sent to the service.
///
/// The kind-slots map onto the protobuf oneof, so setting a second slot
/// replaces the first. A timestamp can accompany any slot.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    entity: Option<pb::entity::Entity>,
    timestamp: Option<Timestamp>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    entity_setters!(
        site: pb::Site => Site,
        platform: pb::Platform => Platform,
        manufacturer: pb::Manufacturer => Manufacturer,
        device: pb::Device => Device,
        device_role: pb::Role => DeviceRole,
        device_type: pb::DeviceType => DeviceType,
        interface: pb::Interface => Interface,
        ip_address: pb::IpAddress => IpAddress,
        prefix: pb::Prefix => Prefix,
        cluster_group: pb::ClusterGroup => ClusterGroup,
        cluster_type: pb::ClusterType => ClusterType,
        cluster: pb::Cluster => Cluster,
        virtual_machine: pb::VirtualMachine => VirtualMachine,
        vminterface: pb::VmInterface => Vminterface,
        virtual_disk: pb::VirtualDisk => VirtualDisk,
    );

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> pb::Entity {
        pb::Entity {
            entity: self.entity,
            timestamp: self.timestamp,
        }
    }
}

impl From<Entity> for pb::Entity {
    fn from(builder: Entity) -> Self {
        builder.build()
    }
}

macro_rules! reference_conversions {
    ($($message:ty => $builder:ty),* $(,)?) => {$(
        impl From<$message> for Reference<$message> {
            fn from(message: $message) -> Self {
                Reference::Built(message)
            }
        }

        impl From<$builder> for Reference<$message> {
            fn from(builder: $builder) -> Self {
                Reference::Built(builder.build())
            }
        }
    )*};
}

reference_conversions!(
    pb::Tag => Tag,
    pb::Manufacturer => Manufacturer,
    pb::Platform => Platform,
    pb::Role => Role,
    pb::DeviceType => DeviceType,
    pb::Device => Device,
    pb::Interface => Interface,
    pb::IpAddress => IpAddress,
    pb::Prefix => Prefix,
    pb::Site => Site,
    pb::ClusterGroup => ClusterGroup,
    pb::ClusterType => ClusterType,
    pb::Cluster => Cluster,
    pb::VirtualMachine => VirtualMachine,
    pb::VirtualDisk => VirtualDisk,
    pb::VmInterface => VmInterface,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_all_fields() {
        let tag = Tag::new().name("tag1").slug("tag1-slug").color("ff0000").build();
        assert_eq!(tag.name.as_deref(), Some("tag1"));
        assert_eq!(tag.slug.as_deref(), Some("tag1-slug"));
        assert_eq!(tag.color.as_deref(), Some("ff0000"));
    }

    #[test]
    fn test_tag_with_only_name() {
        let tag = Tag::new().name("tag1").build();
        assert_eq!(tag.name.as_deref(), Some("tag1"));
        assert_eq!(tag.slug, None);
        assert_eq!(tag.color, None);
    }

    #[test]
    fn test_empty_builders_produce_default_messages() {
        assert_eq!(Tag::new().build(), pb::Tag::default());
        assert_eq!(Device::new().build(), pb::Device::default());
        assert_eq!(Entity::new().build(), pb::Entity::default());
    }

    #[test]
    fn test_manufacturer_with_plain_string_tags() {
        let manufacturer = Manufacturer::new()
            .name("Acme")
            .tags(["tag1", "tag2", "tag3"])
            .build();
        assert_eq!(manufacturer.tags.len(), 3);
        for (tag, name) in manufacturer.tags.iter().zip(["tag1", "tag2", "tag3"]) {
            assert_eq!(tag.name.as_deref(), Some(name));
            assert_eq!(tag.slug, None);
            assert_eq!(tag.color, None);
        }
    }

    #[test]
    fn test_manufacturer_with_built_tags() {
        let built = Tag::new().name("tag1").slug("t1").build();
        let manufacturer = Manufacturer::new().name("Acme").tags([built.clone()]).build();
        assert_eq!(manufacturer.tags, vec![built]);
    }

    #[test]
    fn test_platform_with_bare_manufacturer() {
        let platform = Platform::new().name("ios").manufacturer("Cisco").build();
        assert_eq!(
            platform.manufacturer.unwrap().name.as_deref(),
            Some("Cisco")
        );
    }

    #[test]
    fn test_device_propagates_manufacturer() {
        let device = Device::new()
            .name("dev1")
            .device_type("ModelX")
            .platform("platform1")
            .manufacturer("Acme")
            .build();

        let device_type = device.device_type.unwrap();
        assert_eq!(device_type.model.as_deref(), Some("ModelX"));
        assert_eq!(
            device_type.manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );

        let platform = device.platform.unwrap();
        assert_eq!(
            platform.manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_device_keeps_explicit_child_manufacturer() {
        let platform = Platform::new().name("junos").manufacturer("Juniper");
        let device = Device::new()
            .name("dev1")
            .platform(platform)
            .manufacturer("Acme")
            .build();

        assert_eq!(
            device.platform.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Juniper")
        );
    }

    #[test]
    fn test_device_backfills_supplied_child_without_manufacturer() {
        let device_type = DeviceType::new().model("ModelX").build();
        let device = Device::new()
            .device_type(device_type)
            .manufacturer("Acme")
            .build();

        assert_eq!(
            device.device_type.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_rebuilding_explicit_graph_is_identity() {
        let first = Device::new()
            .name("dev1")
            .device_type(DeviceType::new().model("ModelX").manufacturer("Acme"))
            .platform(Platform::new().name("p1").manufacturer("Acme"))
            .site("site1")
            .manufacturer("Acme")
            .build();

        let second = Device::new()
            .name("dev1")
            .device_type(first.device_type.clone().unwrap())
            .platform(first.platform.clone().unwrap())
            .site(first.site.clone().unwrap())
            .manufacturer("Acme")
            .build();

        assert_eq!(first, second);
    }

    #[test]
    fn test_device_with_primary_ips() {
        let device = Device::new()
            .name("dev1")
            .primary_ip4("192.168.0.1/24")
            .primary_ip6("2001:db8::1/64")
            .build();

        assert_eq!(
            device.primary_ip4.unwrap().address.as_deref(),
            Some("192.168.0.1/24")
        );
        assert_eq!(
            device.primary_ip6.unwrap().address.as_deref(),
            Some("2001:db8::1/64")
        );
    }

    #[test]
    fn test_interface_seeds_bare_device() {
        let interface = Interface::new()
            .name("eth0")
            .device("dev1")
            .device_type("ModelX")
            .platform("platform1")
            .role("role1")
            .site("site1")
            .manufacturer("Acme")
            .build();

        let device = interface.device.unwrap();
        assert_eq!(device.name.as_deref(), Some("dev1"));
        assert_eq!(device.site.unwrap().name.as_deref(), Some("site1"));
        assert_eq!(device.role.unwrap().name.as_deref(), Some("role1"));
        assert_eq!(
            device.device_type.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
        assert_eq!(
            device.platform.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_interface_keeps_prebuilt_device() {
        let prebuilt = Device::new().name("dev1").build();
        let interface = Interface::new()
            .name("eth0")
            .device(prebuilt)
            .site("site1")
            .build();

        // Seeding only applies to bare-name devices.
        assert_eq!(interface.device.unwrap().site, None);
    }

    #[test]
    fn test_interface_scalar_fields() {
        let interface = Interface::new()
            .name("eth0")
            .r#type("1000base-t")
            .enabled(true)
            .mtu(1500)
            .mac_address("00:00:00:00:00:01")
            .speed(1000)
            .mgmt_only(false)
            .mark_connected(true)
            .mode("access")
            .build();

        assert_eq!(interface.r#type.as_deref(), Some("1000base-t"));
        assert_eq!(interface.enabled, Some(true));
        assert_eq!(interface.mtu, Some(1500));
        assert_eq!(interface.speed, Some(1000));
        assert_eq!(interface.mgmt_only, Some(false));
        assert_eq!(interface.mark_connected, Some(true));
        assert_eq!(interface.mode.as_deref(), Some("access"));
    }

    #[test]
    fn test_ip_address_seeds_interface_with_device() {
        let ip = IpAddress::new()
            .address("10.0.0.1/24")
            .interface("eth0")
            .device("dev1")
            .site("site1")
            .build();

        let interface = ip.interface.unwrap();
        assert_eq!(interface.name.as_deref(), Some("eth0"));
        let device = interface.device.unwrap();
        assert_eq!(device.name.as_deref(), Some("dev1"));
        assert_eq!(device.site.unwrap().name.as_deref(), Some("site1"));
    }

    #[test]
    fn test_ip_address_propagates_manufacturer_into_device_children() {
        let ip = IpAddress::new()
            .address("10.0.0.1/24")
            .interface("eth0")
            .device("dev1")
            .device_type("ModelX")
            .platform("platform1")
            .manufacturer("Acme")
            .build();

        let device = ip.interface.unwrap().device.unwrap();
        assert_eq!(
            device.device_type.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
        assert_eq!(
            device.platform.unwrap().manufacturer.unwrap().name.as_deref(),
            Some("Acme")
        );
    }

    #[test]
    fn test_ip_address_keeps_prebuilt_interface() {
        let prebuilt = Interface::new().name("eth0").build();
        let ip = IpAddress::new()
            .address("10.0.0.1/24")
            .interface(prebuilt)
            .device("dev1")
            .build();

        assert_eq!(ip.interface.unwrap().device, None);
    }

    #[test]
    fn test_prefix_with_bare_site() {
        let prefix = Prefix::new()
            .prefix("10.0.0.0/16")
            .site("site1")
            .is_pool(true)
            .build();

        assert_eq!(prefix.prefix.as_deref(), Some("10.0.0.0/16"));
        assert_eq!(prefix.site.unwrap().name.as_deref(), Some("site1"));
        assert_eq!(prefix.is_pool, Some(true));
    }

    #[test]
    fn test_cluster_with_bare_references() {
        let cluster = Cluster::new()
            .name("east1")
            .group("group1")
            .r#type("vmware")
            .site("site1")
            .build();

        assert_eq!(cluster.group.unwrap().name.as_deref(), Some("group1"));
        assert_eq!(cluster.r#type.unwrap().name.as_deref(), Some("vmware"));
        assert_eq!(cluster.site.unwrap().name.as_deref(), Some("site1"));
    }

    #[test]
    fn test_virtual_machine_cluster_inherits_site() {
        let vm = VirtualMachine::new()
            .name("vm1")
            .cluster("east1")
            .site("SiteA")
            .build();

        let cluster = vm.cluster.unwrap();
        assert_eq!(cluster.name.as_deref(), Some("east1"));
        assert_eq!(cluster.site.unwrap().name.as_deref(), Some("SiteA"));
    }

    #[test]
    fn test_virtual_machine_backfills_prebuilt_cluster_without_site() {
        let prebuilt = Cluster::new().name("east1").build();
        let vm = VirtualMachine::new()
            .cluster(prebuilt)
            .site("SiteA")
            .build();

        assert_eq!(
            vm.cluster.unwrap().site.unwrap().name.as_deref(),
            Some("SiteA")
        );
    }

    #[test]
    fn test_virtual_machine_keeps_cluster_with_own_site() {
        let prebuilt = Cluster::new().name("east1").site("SiteB");
        let vm = VirtualMachine::new()
            .cluster(prebuilt)
            .site("SiteA")
            .build();

        assert_eq!(
            vm.cluster.unwrap().site.unwrap().name.as_deref(),
            Some("SiteB")
        );
    }

    #[test]
    fn test_virtual_machine_seeds_bare_device() {
        let vm = VirtualMachine::new()
            .name("vm1")
            .device("host1")
            .platform("esxi")
            .site("SiteA")
            .role("hypervisor")
            .build();

        let device = vm.device.unwrap();
        assert_eq!(device.name.as_deref(), Some("host1"));
        assert_eq!(device.platform.unwrap().name.as_deref(), Some("esxi"));
        assert_eq!(device.site.unwrap().name.as_deref(), Some("SiteA"));
        assert_eq!(device.role.unwrap().name.as_deref(), Some("hypervisor"));
    }

    #[test]
    fn test_virtual_disk_with_bare_virtual_machine() {
        let disk = VirtualDisk::new()
            .name("disk0")
            .virtual_machine("vm1")
            .size(2048)
            .build();

        assert_eq!(disk.virtual_machine.unwrap().name.as_deref(), Some("vm1"));
        assert_eq!(disk.size, Some(2048));
    }

    #[test]
    fn test_vminterface_with_bare_virtual_machine() {
        let vmi = VmInterface::new()
            .name("eth0")
            .virtual_machine("vm1")
            .enabled(true)
            .mtu(1500)
            .build();

        assert_eq!(vmi.virtual_machine.unwrap().name.as_deref(), Some("vm1"));
        assert_eq!(vmi.enabled, Some(true));
    }

    #[test]
    fn test_entity_with_site_slot() {
        let entity = Entity::new().site("SiteA").build();
        match entity.entity {
            Some(pb::entity::Entity::Site(site)) => {
                assert_eq!(site.name.as_deref(), Some("SiteA"));
            }
            other => panic!("unexpected entity slot: {other:?}"),
        }
    }

    #[test]
    fn test_entity_accepts_builders_and_bare_names() {
        let entity = Entity::new()
            .device(Device::new().name("dev1").manufacturer("Acme").device_type("ModelX"))
            .build();
        match entity.entity {
            Some(pb::entity::Entity::Device(device)) => {
                assert_eq!(device.name.as_deref(), Some("dev1"));
            }
            other => panic!("unexpected entity slot: {other:?}"),
        }

        let entity = Entity::new().device_type("ModelX").build();
        match entity.entity {
            Some(pb::entity::Entity::DeviceType(device_type)) => {
                assert_eq!(device_type.model.as_deref(), Some("ModelX"));
            }
            other => panic!("unexpected entity slot: {other:?}"),
        }
    }

    #[test]
    fn test_entity_last_slot_wins() {
        let entity = Entity::new().site("SiteA").manufacturer("Acme").build();
        assert!(matches!(
            entity.entity,
            Some(pb::entity::Entity::Manufacturer(_))
        ));
    }

    #[test]
    fn test_entity_timestamp_alongside_slot() {
        let entity = Entity::new()
            .prefix("10.0.0.0/16")
            .timestamp(Timestamp {
                seconds: 1_700_000_000,
                nanos: 0,
            })
            .build();

        assert!(matches!(entity.entity, Some(pb::entity::Entity::Prefix(_))));
        assert_eq!(entity.timestamp.unwrap().seconds, 1_700_000_000);
    }
}
