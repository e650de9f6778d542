use serde::{Deserialize, Serialize};

use crate::chart::bodies::BodyKey;

/// One raw ephemeris record: tropical ecliptic longitude of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBodyRecord {
    pub key: BodyKey,
    pub ecliptic_longitude: f64,
    #[serde(default)]
    pub is_retrograde: bool,
}

/// Mean orbital elements of the Moon, tropical degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarOrbit {
    pub mean_ascending_node: f64,
    pub mean_apogee: f64,
}

/// Everything the chart needs from an ephemeris for one moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemerisSnapshot {
    pub bodies: Vec<RawBodyRecord>,
    #[serde(default)]
    pub lunar_orbit: Option<LunarOrbit>,
}

impl EphemerisSnapshot {
    pub fn body(&self, key: BodyKey) -> Option<&RawBodyRecord> {
        self.bodies.iter().find(|record| record.key == key)
    }
}
