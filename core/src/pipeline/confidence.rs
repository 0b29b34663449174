//! Weighted-presence confidence score.
//!
//! Weights are kept in whole percentage points so the same inputs always map to
//! the exact same `f64`.

use crate::pipeline::normalizer::IdentityFields;

const HOSTNAME_POINTS: u32 = 30;
const OS_POINTS: u32 = 30;
const MANUFACTURER_POINTS: u32 = 20;
const MAC_POINTS: u32 = 10;
const PORTS_POINTS: u32 = 10;
const MAX_POINTS: u32 = 100;

pub fn score(identity: &IdentityFields) -> f64 {
    let signals = [
        (identity.hostname.is_some(), HOSTNAME_POINTS),
        (identity.os_name.is_some(), OS_POINTS),
        (identity.manufacturer.is_some(), MANUFACTURER_POINTS),
        (identity.mac_address.is_some(), MAC_POINTS),
        (!identity.ports.is_empty(), PORTS_POINTS),
    ];

    let points: u32 = signals
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, points)| points)
        .sum();

    f64::from(points.min(MAX_POINTS)) / f64::from(MAX_POINTS)
}
