//! Pure angle helpers shared by every chart component.

use crate::zodiac::types::{Sign, SignPosition, Zodiac};

/// Default sidereal offset in degrees: Lahiri ayanamsa at J2000.0.
pub const DEFAULT_AYANAMSA: f64 = 23.853;

/// Reduce any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// Move a tropical longitude into the requested zodiac using the default ayanamsa.
pub fn apply_zodiac_offset(longitude: f64, zodiac: Zodiac) -> f64 {
    apply_zodiac_offset_with(longitude, zodiac, DEFAULT_AYANAMSA)
}

/// Move a tropical longitude into the requested zodiac. Sidereal subtracts `ayanamsa`.
pub fn apply_zodiac_offset_with(longitude: f64, zodiac: Zodiac, ayanamsa: f64) -> f64 {
    match zodiac {
        Zodiac::Tropical => normalize_degrees(longitude),
        Zodiac::Sidereal => normalize_degrees(longitude - ayanamsa),
    }
}

/// Sign membership. Each sign covers the half-open interval [start, start + 30).
pub fn sign_of(longitude: f64) -> SignPosition {
    let lon = normalize_degrees(longitude);
    let index = ((lon / 30.0).floor() as usize).min(11);
    SignPosition {
        sign: Sign::from_index(index),
        index,
        degrees_in_sign: lon - index as f64 * 30.0,
    }
}

/// Rotate an ecliptic longitude into the ascendant-anchored horizon frame.
pub fn to_horizon_coordinate(ascendant_ecliptic: f64, target_ecliptic: f64) -> f64 {
    normalize_degrees(target_ecliptic - ascendant_ecliptic)
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(a - b);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_negative_and_large() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-10);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-10);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert!((normalize_degrees(-725.0) - 355.0).abs() < 1e-10);
    }

    #[test]
    fn arc_forward_wraps() {
        assert!((arc_forward(10.0, 40.0) - 30.0).abs() < 1e-10);
        assert!((arc_forward(350.0, 20.0) - 30.0).abs() < 1e-10);
        assert_eq!(arc_forward(42.0, 42.0), 0.0);
    }

    #[test]
    fn sign_boundaries_are_half_open() {
        assert_eq!(sign_of(0.0).index, 0);
        assert_eq!(sign_of(29.999_999).index, 0);
        assert_eq!(sign_of(30.0).index, 1);
        assert_eq!(sign_of(30.0).sign, Sign::Taurus);
        assert_eq!(sign_of(359.999_999).index, 11);
        assert_eq!(sign_of(360.0).index, 0);
        assert!((sign_of(45.5).degrees_in_sign - 15.5).abs() < 1e-10);
    }

    #[test]
    fn zodiac_offset() {
        assert_eq!(apply_zodiac_offset(120.5, Zodiac::Tropical), 120.5);
        let sidereal = apply_zodiac_offset(120.5, Zodiac::Sidereal);
        assert!((sidereal - 96.647).abs() < 1e-9);
        assert!((apply_zodiac_offset(10.0, Zodiac::Sidereal) - 346.147).abs() < 1e-9);
        assert!((apply_zodiac_offset_with(10.0, Zodiac::Sidereal, 24.0) - 346.0).abs() < 1e-9);
    }

    #[test]
    fn horizon_is_relative_rotation() {
        assert_eq!(to_horizon_coordinate(100.0, 100.0), 0.0);
        assert!((to_horizon_coordinate(100.0, 10.0) - 270.0).abs() < 1e-10);
        assert!((to_horizon_coordinate(350.0, 20.0) - 30.0).abs() < 1e-10);
    }

    #[test]
    fn separation_is_symmetric_and_bounded() {
        assert!((angular_separation(10.0, 350.0) - 20.0).abs() < 1e-10);
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-10);
        assert!((angular_separation(0.0, 180.0) - 180.0).abs() < 1e-10);
        assert!((angular_separation(100.0, 278.0) - 178.0).abs() < 1e-10);
    }
}
