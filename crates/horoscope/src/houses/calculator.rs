//! House cusp calculators.
//!
//! Every system returns twelve ecliptic longitudes, cusp 1 first. The five
//! quadrant systems share the angles (cusps 1, 4, 7, 10) and the rule that
//! cusps 5, 6, 8, 9 oppose 11, 12, 2, 3; they differ only in how the four
//! intermediate cusps are found.
//!
//! Quadrant cusps are the ecliptic points crossing a circle of position with
//! pole height `pole` at oblique ascension `x`, see [`oblique_longitude`].

use crate::chart::angles::{ascendant_from_ramc, midheaven_from_ramc, oblique_longitude};
use crate::error::HouseCalculationError;
use crate::houses::types::{HouseInput, HouseSystem};
use crate::zodiac::{apply_zodiac_offset_with, arc_forward, normalize_degrees, Zodiac};

const PLACIDUS_MAX_ITERATIONS: usize = 100;
const PLACIDUS_TOLERANCE: f64 = 1e-10;
const ORDER_TOLERANCE: f64 = 1e-6;

/// Strategy for one house division system.
pub trait HouseCuspCalculator: Sync {
    fn system(&self) -> HouseSystem;

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError>;
}

pub struct EqualHouse;
pub struct WholeSign;
pub struct Placidus;
pub struct Koch;
pub struct Regiomontanus;
pub struct Campanus;
pub struct Topocentric;

impl HouseSystem {
    /// The calculator implementing this system.
    pub fn calculator(self) -> &'static dyn HouseCuspCalculator {
        match self {
            HouseSystem::EqualHouse => &EqualHouse,
            HouseSystem::WholeSign => &WholeSign,
            HouseSystem::Placidus => &Placidus,
            HouseSystem::Koch => &Koch,
            HouseSystem::Regiomontanus => &Regiomontanus,
            HouseSystem::Campanus => &Campanus,
            HouseSystem::Topocentric => &Topocentric,
        }
    }
}

impl HouseInput {
    /// Build the input from sidereal time and place, with the angles moved into `zodiac`.
    pub fn from_ramc(ramc: f64, latitude: f64, obliquity: f64, zodiac: Zodiac, ayanamsa: f64) -> Self {
        let ascendant = ascendant_from_ramc(ramc, latitude, obliquity);
        let midheaven = midheaven_from_ramc(ramc, obliquity);
        let zodiac_shift = match zodiac {
            Zodiac::Tropical => 0.0,
            Zodiac::Sidereal => ayanamsa,
        };
        Self {
            ascendant: apply_zodiac_offset_with(ascendant, zodiac, ayanamsa),
            midheaven: apply_zodiac_offset_with(midheaven, zodiac, ayanamsa),
            ramc: normalize_degrees(ramc),
            latitude,
            obliquity,
            zodiac_shift,
        }
    }
}

impl HouseCuspCalculator for EqualHouse {
    fn system(&self) -> HouseSystem {
        HouseSystem::EqualHouse
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        Ok(thirty_degree_cusps(input.ascendant))
    }
}

impl HouseCuspCalculator for WholeSign {
    fn system(&self) -> HouseSystem {
        HouseSystem::WholeSign
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        let sign_start = (normalize_degrees(input.ascendant) / 30.0).floor() * 30.0;
        Ok(thirty_degree_cusps(sign_start))
    }
}

impl HouseCuspCalculator for Placidus {
    fn system(&self) -> HouseSystem {
        HouseSystem::Placidus
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        check_latitude(self.system(), input)?;
        let cusp = |number, fraction, above| {
            placidus_cusp(input.ramc, input.latitude, input.obliquity, fraction, above).ok_or(
                HouseCalculationError::NoConvergence {
                    system: HouseSystem::Placidus,
                    cusp: number,
                    latitude: input.latitude,
                },
            )
        };
        let intermediate = [
            cusp(11, 1.0 / 3.0, true)?,
            cusp(12, 2.0 / 3.0, true)?,
            cusp(2, 2.0 / 3.0, false)?,
            cusp(3, 1.0 / 3.0, false)?,
        ];
        quadrant_cusps(self.system(), input, intermediate)
    }
}

impl HouseCuspCalculator for Koch {
    fn system(&self) -> HouseSystem {
        HouseSystem::Koch
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        check_latitude(self.system(), input)?;
        let (ramc, lat, eps) = (input.ramc, input.latitude, input.obliquity);

        // Ascensional difference of the Midheaven degree
        let mc = midheaven_from_ramc(ramc, eps);
        let dec_mc = declination(mc, eps);
        let sin_ad = lat.to_radians().tan() * dec_mc.to_radians().tan();
        if sin_ad.abs() > 1.0 {
            return Err(HouseCalculationError::NonFinite {
                system: self.system(),
                cusp: 11,
                latitude: lat,
            });
        }
        let semi_arc = 90.0 + sin_ad.asin().to_degrees();

        let asc_at = |sidereal: f64| ascendant_from_ramc(sidereal, lat, eps);
        let intermediate = [
            asc_at(ramc - 2.0 * semi_arc / 3.0),
            asc_at(ramc - semi_arc / 3.0),
            asc_at(ramc + semi_arc / 3.0),
            asc_at(ramc + 2.0 * semi_arc / 3.0),
        ];
        quadrant_cusps(self.system(), input, intermediate)
    }
}

impl HouseCuspCalculator for Regiomontanus {
    fn system(&self) -> HouseSystem {
        HouseSystem::Regiomontanus
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        check_latitude(self.system(), input)?;
        let (ramc, eps) = (input.ramc, input.obliquity);
        let tan_lat = input.latitude.to_radians().tan();
        let pole_1 = (tan_lat * 0.5).atan().to_degrees();
        let pole_2 = (tan_lat * 3f64.sqrt() / 2.0).atan().to_degrees();

        let intermediate = [
            oblique_longitude(ramc + 30.0, pole_1, eps),
            oblique_longitude(ramc + 60.0, pole_2, eps),
            oblique_longitude(ramc + 120.0, pole_2, eps),
            oblique_longitude(ramc + 150.0, pole_1, eps),
        ];
        quadrant_cusps(self.system(), input, intermediate)
    }
}

impl HouseCuspCalculator for Campanus {
    fn system(&self) -> HouseSystem {
        HouseSystem::Campanus
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        check_latitude(self.system(), input)?;
        let (ramc, eps) = (input.ramc, input.obliquity);
        let lat = input.latitude.to_radians();
        let sqrt3 = 3f64.sqrt();

        let pole_1 = (lat.sin() / 2.0).asin().to_degrees();
        let pole_2 = (sqrt3 / 2.0 * lat.sin()).asin().to_degrees();
        // Prime vertical divisions at 30° and 60° from the east point, as equator offsets
        let offset_1 = (sqrt3 / lat.cos()).atan().to_degrees();
        let offset_2 = (1.0 / sqrt3 / lat.cos()).atan().to_degrees();

        let intermediate = [
            oblique_longitude(ramc + 90.0 - offset_1, pole_1, eps),
            oblique_longitude(ramc + 90.0 - offset_2, pole_2, eps),
            oblique_longitude(ramc + 90.0 + offset_2, pole_2, eps),
            oblique_longitude(ramc + 90.0 + offset_1, pole_1, eps),
        ];
        quadrant_cusps(self.system(), input, intermediate)
    }
}

impl HouseCuspCalculator for Topocentric {
    fn system(&self) -> HouseSystem {
        HouseSystem::Topocentric
    }

    fn cusps(&self, input: &HouseInput) -> Result<[f64; 12], HouseCalculationError> {
        check_latitude(self.system(), input)?;
        let (ramc, eps) = (input.ramc, input.obliquity);
        let tan_lat = input.latitude.to_radians().tan();
        let pole_1 = (tan_lat / 3.0).atan().to_degrees();
        let pole_2 = (2.0 * tan_lat / 3.0).atan().to_degrees();

        let intermediate = [
            oblique_longitude(ramc + 30.0, pole_1, eps),
            oblique_longitude(ramc + 60.0, pole_2, eps),
            oblique_longitude(ramc + 120.0, pole_2, eps),
            oblique_longitude(ramc + 150.0, pole_1, eps),
        ];
        quadrant_cusps(self.system(), input, intermediate)
    }
}

/// `start`, `start + 30`, ... normalized.
fn thirty_degree_cusps(start: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(start + (i as f64) * 30.0);
    }
    cusps
}

fn check_latitude(system: HouseSystem, input: &HouseInput) -> Result<(), HouseCalculationError> {
    if let Some(limit) = system.latitude_limit(input.obliquity) {
        if input.latitude.abs() >= limit {
            return Err(HouseCalculationError::Circumpolar {
                system,
                latitude: input.latitude,
                limit,
            });
        }
    }
    Ok(())
}

/// Assemble a full quadrant cusp set from tropical cusps 11, 12, 2, 3.
fn quadrant_cusps(
    system: HouseSystem,
    input: &HouseInput,
    tropical: [f64; 4],
) -> Result<[f64; 12], HouseCalculationError> {
    const NUMBERS: [usize; 4] = [11, 12, 2, 3];
    let mut shifted = [0.0; 4];
    for (i, value) in tropical.iter().enumerate() {
        if !value.is_finite() {
            return Err(HouseCalculationError::NonFinite {
                system,
                cusp: NUMBERS[i],
                latitude: input.latitude,
            });
        }
        shifted[i] = normalize_degrees(value - input.zodiac_shift);
    }
    let [c11, c12, c2, c3] = shifted;

    let mut cusps = [0.0; 12];
    cusps[0] = normalize_degrees(input.ascendant);
    cusps[1] = c2;
    cusps[2] = c3;
    cusps[3] = normalize_degrees(input.midheaven + 180.0);
    cusps[4] = normalize_degrees(c11 + 180.0);
    cusps[5] = normalize_degrees(c12 + 180.0);
    cusps[6] = normalize_degrees(input.ascendant + 180.0);
    cusps[7] = normalize_degrees(c2 + 180.0);
    cusps[8] = normalize_degrees(c3 + 180.0);
    cusps[9] = normalize_degrees(input.midheaven);
    cusps[10] = c11;
    cusps[11] = c12;
    check_order(system, input, &cusps)?;
    Ok(cusps)
}

/// Cusps must run forward once around the ecliptic: the forward arcs between
/// consecutive cusps add up to exactly one turn.
fn check_order(
    system: HouseSystem,
    input: &HouseInput,
    cusps: &[f64; 12],
) -> Result<(), HouseCalculationError> {
    let turn: f64 = (0..12)
        .map(|i| arc_forward(cusps[i], cusps[(i + 1) % 12]))
        .sum();
    if turn > 360.0 + ORDER_TOLERANCE {
        return Err(HouseCalculationError::Unordered {
            system,
            latitude: input.latitude,
            turns: turn / 360.0,
        });
    }
    Ok(())
}

/// Declination of the ecliptic point at `longitude`.
fn declination(longitude: f64, obliquity: f64) -> f64 {
    (obliquity.to_radians().sin() * longitude.to_radians().sin())
        .asin()
        .to_degrees()
}

/// Diurnal semi-arc in degrees, `None` when the point never rises or sets.
fn diurnal_semi_arc(declination: f64, latitude: f64) -> Option<f64> {
    let cos_h = -(declination.to_radians().tan() * latitude.to_radians().tan());
    if cos_h.abs() > 1.0 {
        return None;
    }
    Some(cos_h.acos().to_degrees())
}

/// Placidus cusp by fixed-point iteration on right ascension.
///
/// Above the horizon the cusp sits `fraction` of its own diurnal semi-arc east
/// of the meridian; below, `fraction` of its nocturnal semi-arc west of the
/// lower meridian.
fn placidus_cusp(ramc: f64, lat: f64, eps: f64, fraction: f64, above_horizon: bool) -> Option<f64> {
    let mut ra = if above_horizon {
        ramc + 90.0 * fraction
    } else {
        ramc + 180.0 - 90.0 * fraction
    };

    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let lon = oblique_longitude(ra, 0.0, eps);
        let semi_arc = diurnal_semi_arc(declination(lon, eps), lat)?;
        let next = if above_horizon {
            ramc + fraction * semi_arc
        } else {
            ramc + 180.0 - fraction * (180.0 - semi_arc)
        };
        if (next - ra).abs() < PLACIDUS_TOLERANCE {
            return Some(oblique_longitude(next, 0.0, eps));
        }
        ra = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.439_291_1;

    fn input(ramc: f64, latitude: f64) -> HouseInput {
        HouseInput::from_ramc(ramc, latitude, EPS, Zodiac::Tropical, 0.0)
    }

    #[test]
    fn equal_cusps_wrap_around() {
        let mut inp = input(0.0, 0.0);
        inp.ascendant = 350.0;
        let cusps = EqualHouse.cusps(&inp).unwrap();
        assert!((cusps[0] - 350.0).abs() < 1e-10);
        assert!((cusps[1] - 20.0).abs() < 1e-10);
        assert!((cusps[11] - 320.0).abs() < 1e-10);
    }

    #[test]
    fn whole_sign_starts_at_sign_boundary() {
        let mut inp = input(0.0, 0.0);
        inp.ascendant = 47.3;
        let cusps = WholeSign.cusps(&inp).unwrap();
        assert_eq!(cusps[0], 30.0);
        assert_eq!(cusps[11], 0.0);
    }

    #[test]
    fn semi_arc_at_equator_is_six_hours() {
        assert!((diurnal_semi_arc(0.0, 0.0).unwrap() - 90.0).abs() < 1e-10);
        assert!((diurnal_semi_arc(20.0, 0.0).unwrap() - 90.0).abs() < 1e-10);
        assert!(diurnal_semi_arc(30.0, 70.0).is_none());
    }

    #[test]
    fn declination_at_solstice_is_obliquity() {
        assert!((declination(90.0, EPS) - EPS).abs() < 1e-10);
        assert!(declination(0.0, EPS).abs() < 1e-10);
    }

    #[test]
    fn quadrant_angles_are_pinned() {
        let inp = input(123.0, 40.0);
        for system in [HouseSystem::Placidus, HouseSystem::Koch, HouseSystem::Topocentric] {
            let cusps = system.calculator().cusps(&inp).unwrap();
            assert_eq!(cusps[0], inp.ascendant);
            assert_eq!(cusps[9], inp.midheaven);
            assert!((cusps[6] - normalize_degrees(inp.ascendant + 180.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn crossed_cusps_are_rejected() {
        let inp = input(0.0, 10.0);
        let mut cusps = thirty_degree_cusps(0.0);
        assert!(check_order(HouseSystem::Koch, &inp, &cusps).is_ok());
        cusps.swap(3, 4);
        match check_order(HouseSystem::Koch, &inp, &cusps) {
            Err(HouseCalculationError::Unordered { system, turns, .. }) => {
                assert_eq!(system, HouseSystem::Koch);
                assert!(turns > 1.5);
            }
            other => panic!("expected Unordered, got {other:?}"),
        }
    }

    #[test]
    fn calculators_report_their_system() {
        for system in HouseSystem::all() {
            assert_eq!(system.calculator().system(), *system);
        }
    }
}
