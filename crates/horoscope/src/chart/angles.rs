//! Ascendant and Midheaven.
//!
//! Both angles are ecliptic points found from the right ascension of the
//! meridian (RAMC, the local sidereal time in degrees):
//!
//! - Midheaven: the ecliptic point on the meridian,
//!   `atan2(sin RAMC, cos RAMC cos ε)`.
//! - Ascendant: the ecliptic point on the eastern horizon,
//!   `atan2(cos RAMC, -(sin RAMC cos ε + tan φ sin ε))`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::origin::Origin;
use crate::zodiac::{apply_zodiac_offset_with, normalize_degrees, ChartPosition, Sign, Zodiac};

/// Ecliptic longitude crossing a circle of position.
///
/// `oblique_ascension` is measured along the equator from the vernal point,
/// `pole` is the circle's pole height above the equator. With `pole = 0`
/// this converts right ascension to ecliptic longitude; with the observer
/// latitude as pole and `RAMC + 90°` it yields the Ascendant.
pub fn oblique_longitude(oblique_ascension: f64, pole: f64, obliquity: f64) -> f64 {
    let x = oblique_ascension.to_radians();
    let eps = obliquity.to_radians();
    let y = x.sin();
    let z = x.cos() * eps.cos() - pole.to_radians().tan() * eps.sin();
    normalize_degrees(y.atan2(z).to_degrees())
}

/// Tropical Ascendant for a sidereal time, latitude and obliquity.
pub fn ascendant_from_ramc(ramc: f64, latitude: f64, obliquity: f64) -> f64 {
    oblique_longitude(ramc + 90.0, latitude, obliquity)
}

/// Tropical Midheaven for a sidereal time and obliquity.
pub fn midheaven_from_ramc(ramc: f64, obliquity: f64) -> f64 {
    oblique_longitude(ramc, 0.0, obliquity)
}

/// Ascendant of `origin` in the chart zodiac. Its horizon coordinate is always 0.
pub fn ascendant(origin: &Origin, zodiac: Zodiac, ayanamsa: f64) -> ChartPosition {
    let tropical = ascendant_from_ramc(
        origin.local_sidereal_time(),
        origin.latitude(),
        origin.obliquity(),
    );
    let ecliptic = apply_zodiac_offset_with(tropical, zodiac, ayanamsa);
    ChartPosition::relative_to(ecliptic, ecliptic)
}

/// Midheaven of `origin` in the chart zodiac, placed relative to `ascendant`.
pub fn midheaven(
    origin: &Origin,
    zodiac: Zodiac,
    ayanamsa: f64,
    ascendant: &ChartPosition,
) -> ChartPosition {
    let tropical = midheaven_from_ramc(origin.local_sidereal_time(), origin.obliquity());
    let ecliptic = apply_zodiac_offset_with(tropical, zodiac, ayanamsa);
    ChartPosition::relative_to(ecliptic, ascendant.ecliptic())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleKey {
    Ascendant,
    Midheaven,
}

pub const ALL_ANGLES: [AngleKey; 2] = [AngleKey::Ascendant, AngleKey::Midheaven];

impl AngleKey {
    pub fn key(self) -> &'static str {
        match self {
            AngleKey::Ascendant => "ascendant",
            AngleKey::Midheaven => "midheaven",
        }
    }
}

impl fmt::Display for AngleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A chart angle with its sign and house placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Angle {
    pub key: AngleKey,
    pub position: ChartPosition,
    pub sign: Sign,
    pub house: u8,
}
