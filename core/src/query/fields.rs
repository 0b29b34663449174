//! Typed field registries for devices and assets.
//!
//! Each entity owns its own `key → accessor` table. Keys can overlap between
//! entities with different meaning: `status` is New/Converted on a device and
//! active/inactive on an asset.

use std::fmt;
use std::sync::OnceLock;

use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::CanonicalDeviceRecord;

use crate::query::value::{FieldType, FieldValue};

pub type Accessor<T> = fn(&T) -> Option<FieldValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Device,
    Asset,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Device => f.write_str("device"),
            EntityKind::Asset => f.write_str("asset"),
        }
    }
}

pub struct FieldDescriptor<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub field_type: FieldType,
    /// Sample query shown next to the field in completions.
    pub example: &'static str,
    pub options: Option<&'static [&'static str]>,
    /// Part of the free-text (simple) search.
    pub searchable: bool,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(
        key: &'static str,
        label: &'static str,
        field_type: FieldType,
        example: &'static str,
        accessor: Accessor<T>,
    ) -> Self {
        Self {
            key,
            label,
            field_type,
            example,
            options: None,
            searchable: false,
            accessor,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = Some(options);
        self
    }

    /// Maps `input` onto one of the field's options when it only differs in
    /// case or spacing, so `NetworkDevice` reads as `Network Device`.
    pub fn canonical_option<'a>(&self, input: &'a str) -> &'a str {
        let wanted = squash(input);
        self.options
            .and_then(|options| options.iter().copied().find(|option| squash(option) == wanted))
            .unwrap_or(input)
    }

    /// `None` when the record has no value for this field.
    pub fn resolve(&self, record: &T) -> Option<FieldValue> {
        (self.accessor)(record)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("field_type", &self.field_type)
            .field("searchable", &self.searchable)
            .finish()
    }
}

pub struct FieldRegistry<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> FieldRegistry<T> {
    pub fn new(fields: Vec<FieldDescriptor<T>>) -> Self {
        Self { fields }
    }

    /// Case-insensitive key lookup.
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.key.eq_ignore_ascii_case(key))
    }

    /// Total: unknown keys and missing values both come back as `None`.
    pub fn resolve(&self, key: &str, record: &T) -> Option<FieldValue> {
        self.get(key).and_then(|field| field.resolve(record))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter()
    }

    pub fn searchable(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter().filter(|field| field.searchable)
    }
}

/// A record type that can be searched and sorted.
pub trait Entity: Sized + 'static {
    const KIND: EntityKind;

    fn registry() -> &'static FieldRegistry<Self>;
}

impl Entity for CanonicalDeviceRecord {
    const KIND: EntityKind = EntityKind::Device;

    fn registry() -> &'static FieldRegistry<Self> {
        device_fields()
    }
}

impl Entity for AssetRecord {
    const KIND: EntityKind = EntityKind::Asset;

    fn registry() -> &'static FieldRegistry<Self> {
        asset_fields()
    }
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

const DEVICE_TYPES: &[&str] = &["Router", "Printer", "Server", "Workstation", "Network Device"];
const DEVICE_STATUSES: &[&str] = &["New", "Converted"];
const ASSET_STATUSES: &[&str] = &["active", "inactive"];
const BOOLEANS: &[&str] = &["true", "false"];

static DEVICE_FIELDS: OnceLock<FieldRegistry<CanonicalDeviceRecord>> = OnceLock::new();
static ASSET_FIELDS: OnceLock<FieldRegistry<AssetRecord>> = OnceLock::new();

type DeviceField = FieldDescriptor<CanonicalDeviceRecord>;
type AssetField = FieldDescriptor<AssetRecord>;

pub fn device_fields() -> &'static FieldRegistry<CanonicalDeviceRecord> {
    DEVICE_FIELDS.get_or_init(|| {
        use FieldType::{Date, Number, String as Text};

        FieldRegistry::new(vec![
            DeviceField::new("id", "Device ID", Text, "id=42", |d| text(&d.id)),
            DeviceField::new("ip", "IP Address", Text, "ip=192.168.1.10", |d| {
                text(&d.ip_address)
            })
            .searchable(),
            DeviceField::new("hostname", "Hostname", Text, "hostname=web01", |d| {
                opt_text(&d.hostname)
            })
            .searchable(),
            DeviceField::new("mac", "MAC Address", Text, "mac=AA:BB:CC:DD:EE:FF", |d| {
                opt_text(&d.mac_address)
            })
            .searchable(),
            DeviceField::new("os", "Operating System", Text, "os=Windows 11", |d| {
                opt_text(&d.os_name)
            })
            .searchable(),
            DeviceField::new("manufacturer", "Manufacturer", Text, "manufacturer=Cisco", |d| {
                opt_text(&d.manufacturer)
            })
            .searchable(),
            DeviceField::new("model", "Model", Text, "model=C9300", |d| opt_text(&d.model)),
            DeviceField::new("type", "Device Type", Text, "type=Server", |d| {
                text(d.device_type.as_str())
            })
            .options(DEVICE_TYPES)
            .searchable(),
            DeviceField::new("status", "Conversion Status", Text, "status=New", |d| {
                text(d.status.as_str())
            })
            .options(DEVICE_STATUSES),
            DeviceField::new("confidence", "Confidence (%)", Number, "confidence>70", |d| {
                Some(FieldValue::Number(d.confidence_percent()))
            }),
            DeviceField::new("ports", "Open Port Count", Number, "ports>=3", |d| {
                Some(FieldValue::Number(d.ports.len() as f64))
            }),
            DeviceField::new("services", "Services", Text, "services=ssh", |d| {
                joined(d.services.iter().map(|svc| svc.name.as_str()))
            }),
            DeviceField::new("last_seen", "Last Seen", Date, "last_seen>2024-01-01", |d| {
                opt_text(&d.last_seen)
            }),
            DeviceField::new("scan_id", "Scan ID", Text, "scan_id=scan-17", |d| {
                opt_text(&d.provenance.scan_id)
            })
            .searchable(),
            DeviceField::new("scan", "Scan Name", Text, "scan=Nightly sweep", |d| {
                opt_text(&d.provenance.scan_name)
            })
            .searchable(),
            DeviceField::new("method", "Discovery Method", Text, "method=arp", |d| {
                opt_text(&d.provenance.discovery_method)
            })
            .searchable(),
        ])
    })
}

pub fn asset_fields() -> &'static FieldRegistry<AssetRecord> {
    ASSET_FIELDS.get_or_init(|| {
        use FieldType::{Date, Number, String as Text};

        FieldRegistry::new(vec![
            AssetField::new("id", "Asset ID", Text, "id=7f3c", |a| text(&a.id)),
            AssetField::new("name", "Name", Text, "name=core-switch", |a| text(&a.name))
                .searchable(),
            AssetField::new("ip", "Primary IP", Text, "ip=10.0.0.1", |a| text(&a.primary_ip))
                .searchable(),
            AssetField::new("ips", "IP Addresses", Text, "ips=10.0.0.1", |a| {
                joined(a.ip_addresses.iter().map(String::as_str))
            }),
            AssetField::new("ip_count", "IP Address Count", Number, "ip_count>1", |a| {
                Some(FieldValue::Number(a.ip_addresses.len() as f64))
            }),
            AssetField::new("mac", "MAC Address", Text, "mac=AA:BB:CC:DD:EE:FF", |a| {
                opt_text(&a.mac_address)
            }),
            AssetField::new("hostname", "Hostname", Text, "hostname=web01", |a| {
                opt_text(&a.hostname)
            }),
            AssetField::new("os", "Operating System", Text, "os=Ubuntu", |a| opt_text(&a.os_name)),
            AssetField::new("manufacturer", "Manufacturer", Text, "manufacturer=Dell", |a| {
                opt_text(&a.manufacturer)
            })
            .searchable(),
            AssetField::new("model", "Model", Text, "model=R740", |a| opt_text(&a.model))
                .searchable(),
            AssetField::new("type", "Device Type", Text, "type=Server", |a| {
                opt_text(&a.device_type)
            })
            .options(DEVICE_TYPES)
            .searchable(),
            AssetField::new("status", "Status", Text, "status=active", |a| {
                text(if a.is_active { "active" } else { "inactive" })
            })
            .options(ASSET_STATUSES),
            AssetField::new("managed", "Managed", Text, "managed=true", |a| {
                text(if a.is_managed { "true" } else { "false" })
            })
            .options(BOOLEANS),
            AssetField::new("location", "Location", Text, "location=HQ", |a| {
                opt_text(&a.location)
            })
            .searchable(),
            AssetField::new("department", "Department", Text, "department=IT", |a| {
                opt_text(&a.department)
            }),
            AssetField::new("labels", "Labels", Text, "labels=critical", |a| {
                joined(a.labels.iter().map(String::as_str))
            })
            .searchable(),
            AssetField::new("created", "Created", Date, "created>2024-01-01", |a| {
                Some(FieldValue::Text(a.created_at.to_rfc3339()))
            }),
        ])
    })
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::from(value))
}

fn opt_text(value: &Option<String>) -> Option<FieldValue> {
    value.as_deref().map(FieldValue::from)
}

/// Empty collections resolve to `None` rather than an empty string.
fn joined<'a>(items: impl Iterator<Item = &'a str>) -> Option<FieldValue> {
    let joined = items.collect::<Vec<_>>().join(", ");
    (!joined.is_empty()).then_some(FieldValue::Text(joined))
}
