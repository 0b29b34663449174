//! Fixed-priority device type decision table.
//!
//! Rules are checked top to bottom and the first one whose conditions all hold
//! decides the type. Text conditions are case-insensitive substring tests; an
//! absent field never satisfies one.

use assetr_common::inventory::device::{DeviceType, Port};

use crate::pipeline::normalizer::IdentityFields;

enum Condition {
    ManufacturerContains(&'static str),
    OsContains(&'static str),
    AnyPortIn(&'static [u16]),
}

struct Rule {
    all_of: &'static [Condition],
    device_type: DeviceType,
}

const RULES: &[Rule] = &[
    Rule {
        all_of: &[Condition::ManufacturerContains("cisco")],
        device_type: DeviceType::Router,
    },
    Rule {
        all_of: &[
            Condition::ManufacturerContains("hp"),
            Condition::AnyPortIn(&[9100]),
        ],
        device_type: DeviceType::Printer,
    },
    Rule {
        all_of: &[Condition::OsContains("windows")],
        device_type: DeviceType::Workstation,
    },
    Rule {
        all_of: &[Condition::OsContains("linux")],
        device_type: DeviceType::Server,
    },
    Rule {
        all_of: &[Condition::OsContains("mac")],
        device_type: DeviceType::Workstation,
    },
    Rule {
        all_of: &[Condition::AnyPortIn(&[22, 80, 443])],
        device_type: DeviceType::Server,
    },
    Rule {
        all_of: &[Condition::AnyPortIn(&[3389])],
        device_type: DeviceType::Workstation,
    },
];

const FALLBACK: DeviceType = DeviceType::NetworkDevice;

pub fn classify(identity: &IdentityFields) -> DeviceType {
    classify_parts(
        identity.manufacturer.as_deref(),
        identity.os_name.as_deref(),
        &identity.ports,
    )
}

pub fn classify_parts(manufacturer: Option<&str>, os_name: Option<&str>, ports: &[Port]) -> DeviceType {
    let manufacturer = manufacturer.map(str::to_lowercase);
    let os_name = os_name.map(str::to_lowercase);

    let holds = |condition: &Condition| match condition {
        Condition::ManufacturerContains(needle) => {
            manufacturer.as_deref().is_some_and(|m| m.contains(needle))
        }
        Condition::OsContains(needle) => os_name.as_deref().is_some_and(|os| os.contains(needle)),
        Condition::AnyPortIn(wanted) => ports.iter().any(|port| wanted.contains(&port.number)),
    };

    RULES
        .iter()
        .find(|rule| rule.all_of.iter().all(|condition| holds(condition)))
        .map(|rule| rule.device_type)
        .unwrap_or(FALLBACK)
}
