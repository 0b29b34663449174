use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::{CanonicalDeviceRecord, ConversionStatus};
use colored::*;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

fn optional(value: Option<&str>) -> ColoredString {
    match value {
        Some(v) => v.color(colors::TEXT_DEFAULT),
        None => "-".color(colors::MISSING),
    }
}

pub fn confidence_to_colored(confidence: f64) -> ColoredString {
    let percent = (confidence * 100.0).round();
    let color = if percent >= 70.0 {
        colors::CONFIDENCE_HIGH
    } else if percent >= 40.0 {
        colors::CONFIDENCE_MID
    } else {
        colors::CONFIDENCE_LOW
    };
    format!("{percent}%").color(color).bold()
}

pub fn status_to_colored(status: ConversionStatus) -> ColoredString {
    match status {
        ConversionStatus::New => status.as_str().color(colors::STATUS_NEW),
        ConversionStatus::Converted => status.as_str().color(colors::STATUS_CONVERTED),
    }
}

pub fn device_title(device: &CanonicalDeviceRecord) -> String {
    device
        .hostname
        .clone()
        .unwrap_or_else(|| device.ip_address.clone())
}

pub fn device_details(device: &CanonicalDeviceRecord) -> Vec<Detail> {
    let mut details = vec![
        detail("IP", device.ip_address.color(colors::IPV4_ADDR)),
        detail(
            "MAC",
            device
                .mac_address
                .as_deref()
                .map(|mac| mac.color(colors::MAC_ADDR))
                .unwrap_or_else(|| optional(None)),
        ),
        detail("OS", optional(device.os_name.as_deref())),
        detail("Vendor", optional(device.manufacturer.as_deref())),
        detail("Type", device.device_type.as_str().normal()),
        detail("Conf", confidence_to_colored(device.confidence)),
        detail("Status", status_to_colored(device.status)),
    ];

    if !device.ports.is_empty() {
        let ports = device
            .port_numbers()
            .map(|p| p.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        details.insert(3, detail("Ports", ports.normal()));
    }

    details
}

pub fn device_line(device: &CanonicalDeviceRecord) -> String {
    format!(
        "{} {} {} {}",
        device.id.color(colors::ACCENT),
        device.ip_address.color(colors::IPV4_ADDR),
        device_title(device).color(colors::PRIMARY),
        status_to_colored(device.status)
    )
}

pub fn asset_details(asset: &AssetRecord) -> Vec<Detail> {
    let labels = (!asset.labels.is_empty()).then(|| asset.labels.join(", "));
    vec![
        detail("IP", asset.primary_ip.color(colors::IPV4_ADDR)),
        detail("Type", optional(asset.device_type.as_deref())),
        detail("Vendor", optional(asset.manufacturer.as_deref())),
        detail("Model", optional(asset.model.as_deref())),
        detail("Where", optional(asset.location.as_deref())),
        detail("Labels", optional(labels.as_deref())),
        detail(
            "State",
            match (asset.is_active, asset.is_managed) {
                (true, true) => "active, managed".green(),
                (true, false) => "active".green(),
                (false, _) => "inactive".color(colors::MISSING),
            },
        ),
        detail("Created", asset.created_at.format("%Y-%m-%d %H:%M").to_string().normal()),
    ]
}

pub fn asset_line(asset: &AssetRecord) -> String {
    format!(
        "{} {} {}",
        asset.id.color(colors::ACCENT),
        asset.primary_ip.color(colors::IPV4_ADDR),
        asset.name.color(colors::PRIMARY)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_shown_as_percent() {
        colored::control::set_override(false);
        assert_eq!(confidence_to_colored(0.5).to_string(), "50%");
        assert_eq!(confidence_to_colored(1.0).to_string(), "100%");
    }
}
