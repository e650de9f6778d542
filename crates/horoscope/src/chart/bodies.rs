//! Celestial bodies and lunar points placed in the chart.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::{EntitySet, Keyed};
use crate::ephemeris::types::{LunarOrbit, RawBodyRecord};
use crate::error::InputDataError;
use crate::houses::{locate_house, House};
use crate::zodiac::{apply_zodiac_offset_with, normalize_degrees, sign_of, ChartPosition, Sign, Zodiac};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKey {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
}

pub const ALL_BODIES: [BodyKey; 11] = [
    BodyKey::Sun,
    BodyKey::Moon,
    BodyKey::Mercury,
    BodyKey::Venus,
    BodyKey::Mars,
    BodyKey::Jupiter,
    BodyKey::Saturn,
    BodyKey::Uranus,
    BodyKey::Neptune,
    BodyKey::Pluto,
    BodyKey::Chiron,
];

impl BodyKey {
    pub const fn all() -> &'static [BodyKey; 11] {
        &ALL_BODIES
    }

    pub fn key(self) -> &'static str {
        match self {
            BodyKey::Sun => "sun",
            BodyKey::Moon => "moon",
            BodyKey::Mercury => "mercury",
            BodyKey::Venus => "venus",
            BodyKey::Mars => "mars",
            BodyKey::Jupiter => "jupiter",
            BodyKey::Saturn => "saturn",
            BodyKey::Uranus => "uranus",
            BodyKey::Neptune => "neptune",
            BodyKey::Pluto => "pluto",
            BodyKey::Chiron => "chiron",
        }
    }
}

impl fmt::Display for BodyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Points derived from the Moon's orbit rather than read from the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKey {
    NorthNode,
    SouthNode,
    Lilith,
}

pub const ALL_POINTS: [PointKey; 3] = [PointKey::NorthNode, PointKey::SouthNode, PointKey::Lilith];

impl PointKey {
    pub const fn all() -> &'static [PointKey; 3] {
        &ALL_POINTS
    }

    pub fn key(self) -> &'static str {
        match self {
            PointKey::NorthNode => "northnode",
            PointKey::SouthNode => "southnode",
            PointKey::Lilith => "lilith",
        }
    }

    /// Tropical longitude of the point for the given lunar orbit.
    pub fn longitude(self, orbit: &LunarOrbit) -> f64 {
        match self {
            PointKey::NorthNode => normalize_degrees(orbit.mean_ascending_node),
            PointKey::SouthNode => normalize_degrees(orbit.mean_ascending_node + 180.0),
            PointKey::Lilith => normalize_degrees(orbit.mean_apogee),
        }
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub key: BodyKey,
    pub position: ChartPosition,
    pub sign: Sign,
    pub house: u8,
    pub is_retrograde: bool,
}

impl Keyed for CelestialBody {
    type Key = BodyKey;

    fn key(&self) -> BodyKey {
        self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialPoint {
    pub key: PointKey,
    pub position: ChartPosition,
    pub sign: Sign,
    pub house: u8,
}

impl Keyed for CelestialPoint {
    type Key = PointKey;

    fn key(&self) -> PointKey {
        self.key
    }
}

/// Shared placement context: zodiac frame, Ascendant and the assembled houses.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub zodiac: Zodiac,
    pub ayanamsa: f64,
    pub ascendant: f64,
    pub houses: &'a [House; 12],
}

impl Placement<'_> {
    /// Chart position, sign and house id of a tropical longitude.
    pub fn place(&self, tropical_longitude: f64) -> (ChartPosition, Sign, u8) {
        let ecliptic = apply_zodiac_offset_with(tropical_longitude, self.zodiac, self.ayanamsa);
        let position = ChartPosition::relative_to(ecliptic, self.ascendant);
        let house = locate_house(self.houses, ecliptic).id;
        (position, sign_of(ecliptic).sign, house)
    }
}

/// Place every raw body record, keeping the record order.
pub fn process_bodies(
    records: &[RawBodyRecord],
    placement: &Placement<'_>,
) -> Result<EntitySet<CelestialBody>, InputDataError> {
    let bodies = records
        .iter()
        .map(|record| {
            if !record.ecliptic_longitude.is_finite() {
                return Err(InputDataError::NonFiniteLongitude {
                    key: record.key.to_string(),
                    value: record.ecliptic_longitude,
                });
            }
            let (position, sign, house) = placement.place(record.ecliptic_longitude);
            Ok(CelestialBody {
                key: record.key,
                position,
                sign,
                house,
                is_retrograde: record.is_retrograde,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    EntitySet::try_from_vec(bodies).map_err(|key| InputDataError::DuplicateRecord {
        key: key.to_string(),
    })
}

/// Derive the lunar points. They need the Moon record and its orbit elements.
pub fn process_points(
    records: &[RawBodyRecord],
    lunar_orbit: Option<&LunarOrbit>,
    placement: &Placement<'_>,
) -> Result<EntitySet<CelestialPoint>, InputDataError> {
    if !records.iter().any(|r| r.key == BodyKey::Moon) {
        return Err(InputDataError::MissingMoon);
    }
    let orbit = lunar_orbit.ok_or(InputDataError::MissingLunarOrbit)?;
    for (key, value) in [
        ("northnode", orbit.mean_ascending_node),
        ("lilith", orbit.mean_apogee),
    ] {
        if !value.is_finite() {
            return Err(InputDataError::NonFiniteLongitude {
                key: key.to_string(),
                value,
            });
        }
    }

    let points = ALL_POINTS
        .iter()
        .map(|&key| {
            let (position, sign, house) = placement.place(key.longitude(orbit));
            CelestialPoint {
                key,
                position,
                sign,
                house,
            }
        })
        .collect();

    EntitySet::try_from_vec(points).map_err(|key| InputDataError::DuplicateRecord {
        key: key.to_string(),
    })
}
