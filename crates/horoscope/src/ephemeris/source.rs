//! Ephemeris collaborators. The chart never hardcodes body positions.

use crate::chart::origin::Origin;
use crate::ephemeris::types::{EphemerisSnapshot, LunarOrbit};
use crate::error::HoroscopeError;

/// Supplies raw body positions for an origin.
pub trait EphemerisSource {
    fn snapshot(&self, origin: &Origin) -> Result<EphemerisSnapshot, HoroscopeError>;
}

impl<F> EphemerisSource for F
where
    F: Fn(&Origin) -> Result<EphemerisSnapshot, HoroscopeError>,
{
    fn snapshot(&self, origin: &Origin) -> Result<EphemerisSnapshot, HoroscopeError> {
        self(origin)
    }
}

/// Serves one stored snapshot regardless of the moment.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    snapshot: EphemerisSnapshot,
    mean_lunar_orbit: bool,
}

impl FixedEphemeris {
    pub fn new(snapshot: EphemerisSnapshot) -> Self {
        Self {
            snapshot,
            mean_lunar_orbit: false,
        }
    }

    /// Parse a JSON snapshot, see [`EphemerisSnapshot`] for the shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Fill in missing lunar orbit elements from the mean elements at the origin.
    pub fn with_mean_lunar_orbit(mut self) -> Self {
        self.mean_lunar_orbit = true;
        self
    }

    pub fn stored(&self) -> &EphemerisSnapshot {
        &self.snapshot
    }
}

impl EphemerisSource for FixedEphemeris {
    fn snapshot(&self, origin: &Origin) -> Result<EphemerisSnapshot, HoroscopeError> {
        let mut snapshot = self.snapshot.clone();
        if self.mean_lunar_orbit && snapshot.lunar_orbit.is_none() {
            snapshot.lunar_orbit = Some(LunarOrbit::mean_at(origin));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::origin::{GeoLocation, LocalMoment};

    fn origin() -> Origin {
        Origin::new(
            LocalMoment { year: 2000, month: 1, day: 1, hour: 12, minute: 0, second: 0 },
            0,
            GeoLocation { latitude: 0.0, longitude: 0.0 },
        )
        .unwrap()
    }

    #[test]
    fn fixed_source_fills_lunar_orbit_on_request() {
        let plain = FixedEphemeris::default();
        assert!(plain.snapshot(&origin()).unwrap().lunar_orbit.is_none());

        let filled = FixedEphemeris::default().with_mean_lunar_orbit();
        let orbit = filled.snapshot(&origin()).unwrap().lunar_orbit.unwrap();
        assert!((orbit.mean_ascending_node - 125.044_547_9).abs() < 1e-6);
    }

    #[test]
    fn stored_orbit_is_kept() {
        let stored = LunarOrbit { mean_ascending_node: 1.0, mean_apogee: 2.0 };
        let source = FixedEphemeris::new(EphemerisSnapshot {
            bodies: Vec::new(),
            lunar_orbit: Some(stored),
        })
        .with_mean_lunar_orbit();
        assert_eq!(source.snapshot(&origin()).unwrap().lunar_orbit, Some(stored));
    }

    #[test]
    fn closures_are_sources() {
        let source = |_: &Origin| -> Result<EphemerisSnapshot, HoroscopeError> {
            Ok(EphemerisSnapshot::default())
        };
        assert!(source.snapshot(&origin()).unwrap().bodies.is_empty());
    }
}
