//! Mean lunar orbital elements.
//!
//! Polynomials in Julian centuries `t` from J2000.0, Meeus, Astronomical
//! Algorithms (2nd ed.), chapter 47:
//! - mean longitude of the ascending node, eq. 47.7
//! - mean longitude of perigee; the mean apogee (Black Moon Lilith) is
//!   perigee + 180°.

use crate::chart::origin::Origin;
use crate::ephemeris::types::LunarOrbit;
use crate::zodiac::normalize_degrees;

/// Mean ascending node longitude in degrees, [0, 360).
pub fn mean_ascending_node(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}

/// Mean lunar perigee longitude in degrees, [0, 360).
pub fn mean_perigee(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    normalize_degrees(
        83.353_246_5 + 4_069.013_728_7 * t - 0.010_320_0 * t2 - t3 / 80_053.0
            + t4 / 18_999_000.0,
    )
}

impl LunarOrbit {
    /// Mean elements at `t` Julian centuries since J2000.0.
    pub fn mean(t: f64) -> Self {
        Self {
            mean_ascending_node: mean_ascending_node(t),
            mean_apogee: normalize_degrees(mean_perigee(t) + 180.0),
        }
    }

    pub fn mean_at(origin: &Origin) -> Self {
        Self::mean(origin.julian_centuries())
    }
}
