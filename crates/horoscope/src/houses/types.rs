//! House system selection and house entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::zodiac::{arc_forward, ChartPosition};

/// The seven supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseSystem {
    /// Time trisection of each point's own diurnal/nocturnal semi-arc.
    #[default]
    Placidus,
    /// Trisection of the Midheaven degree's diurnal semi-arc (birthplace system).
    Koch,
    /// Equal 30° arcs of the prime vertical projected onto the ecliptic.
    Campanus,
    /// Each house is the whole sign, starting from the sign holding the Ascendant.
    WholeSign,
    /// 30° ecliptic arcs measured from the Ascendant.
    EqualHouse,
    /// Equal 30° arcs of the celestial equator projected through the horizon poles.
    Regiomontanus,
    /// Polich-Page: semi-arc method with tangent-scaled pole heights.
    Topocentric,
}

pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 7] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Campanus,
    HouseSystem::WholeSign,
    HouseSystem::EqualHouse,
    HouseSystem::Regiomontanus,
    HouseSystem::Topocentric,
];

impl HouseSystem {
    pub const fn all() -> &'static [HouseSystem; 7] {
        &ALL_HOUSE_SYSTEMS
    }

    pub fn key(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Campanus => "campanus",
            HouseSystem::WholeSign => "whole-sign",
            HouseSystem::EqualHouse => "equal-house",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Topocentric => "topocentric",
        }
    }

    /// Whether cusps come from dividing the quadrants between the angles.
    pub const fn is_quadrant(self) -> bool {
        !matches!(self, HouseSystem::WholeSign | HouseSystem::EqualHouse)
    }

    /// Absolute latitude at and beyond which the system has no solution.
    ///
    /// Semi-arc systems break down inside the polar circle (`90° - obliquity`),
    /// where parts of the ecliptic never rise or set. Regiomontanus and
    /// Campanus only lose their meridian at the poles.
    pub fn latitude_limit(self, obliquity: f64) -> Option<f64> {
        match self {
            HouseSystem::Placidus | HouseSystem::Koch | HouseSystem::Topocentric => {
                Some(90.0 - obliquity)
            }
            HouseSystem::Regiomontanus | HouseSystem::Campanus => Some(90.0),
            HouseSystem::WholeSign | HouseSystem::EqualHouse => None,
        }
    }
}

impl FromStr for HouseSystem {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_HOUSE_SYSTEMS
            .iter()
            .copied()
            .find(|system| system.key() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownHouseSystem {
                system: s.to_string(),
                valid: ALL_HOUSE_SYSTEMS.iter().map(|h| h.key().to_string()).collect(),
            })
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Geometric inputs shared by every house calculator.
///
/// `ascendant` and `midheaven` are already expressed in the chart zodiac.
/// `ramc`, `latitude` and `obliquity` are geometric and zodiac independent;
/// quadrant systems derive tropical cusps from them and then subtract
/// `zodiac_shift` so every cusp lands in the same frame as the Ascendant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseInput {
    pub ascendant: f64,
    pub midheaven: f64,
    pub ramc: f64,
    pub latitude: f64,
    pub obliquity: f64,
    pub zodiac_shift: f64,
}

/// One of the twelve houses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: u8,
    pub cusp: ChartPosition,
}

impl House {
    /// Ecliptic arc from this cusp to `next`'s cusp, wrapping at 360°.
    pub fn span_to(&self, next: &House) -> f64 {
        arc_forward(self.cusp.ecliptic(), next.cusp.ecliptic())
    }
}
