//! Chart assembly.
//!
//! A [`Horoscope`] is built in one pass from an origin, validated settings
//! and an ephemeris source. Construction either returns a complete chart or
//! the first error; nothing is exposed half computed.

use log::debug;
use serde::Serialize;

use crate::aspects::{Aspect, AspectCalculator, AspectEntity, EntityKey};
use crate::chart::angles::{self, Angle, AngleKey};
use crate::chart::bodies::{process_bodies, process_points, CelestialBody, CelestialPoint, Placement};
use crate::chart::origin::Origin;
use crate::chart::settings::{HoroscopeConfig, HoroscopeSettings};
use crate::collection::EntitySet;
use crate::ephemeris::EphemerisSource;
use crate::error::HoroscopeError;
use crate::houses::{assemble_houses, locate_house, House, HouseInput, HouseSystem};
use crate::labels::{Labels, Language};
use crate::zodiac::{sign_of, ChartPosition, Sign, Zodiac, ALL_SIGNS};

/// Start of a sign mapped into the chart's horizon frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZodiacCusp {
    pub sign: Sign,
    pub position: ChartPosition,
}

/// Immutable natal chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Horoscope {
    origin: Origin,
    house_system: HouseSystem,
    zodiac: Zodiac,
    ayanamsa: f64,
    language: Language,
    ascendant: Angle,
    midheaven: Angle,
    sun_sign: Sign,
    houses: [House; 12],
    zodiac_cusps: [ZodiacCusp; 12],
    celestial_bodies: EntitySet<CelestialBody>,
    celestial_points: EntitySet<CelestialPoint>,
    aspects: Vec<Aspect>,
}

impl Horoscope {
    /// Build a chart. The settings are re-checked before any computation.
    pub fn new(
        origin: Origin,
        settings: &HoroscopeSettings,
        source: &dyn EphemerisSource,
    ) -> Result<Self, HoroscopeError> {
        settings.validate()?;
        let (zodiac, ayanamsa) = (settings.zodiac, settings.ayanamsa);

        let asc = angles::ascendant(&origin, zodiac, ayanamsa);
        let mc = angles::midheaven(&origin, zodiac, ayanamsa, &asc);
        debug!(
            "angles: ascendant {:.4}, midheaven {:.4} ({zodiac})",
            asc.ecliptic(),
            mc.ecliptic()
        );

        let sun_sign = Sign::from_calendar_date(origin.month(), origin.day());

        let input = HouseInput::from_ramc(
            origin.local_sidereal_time(),
            origin.latitude(),
            origin.obliquity(),
            zodiac,
            ayanamsa,
        );
        debug!("dispatching {} house calculator", settings.house_system);
        let cusps = settings.house_system.calculator().cusps(&input)?;
        let houses = assemble_houses(&cusps, asc.ecliptic());

        let zodiac_cusps = ALL_SIGNS.map(|sign| ZodiacCusp {
            sign,
            position: ChartPosition::relative_to(sign.start_degrees(), asc.ecliptic()),
        });

        let angle = |key, position: ChartPosition| Angle {
            key,
            position,
            sign: sign_of(position.ecliptic()).sign,
            house: locate_house(&houses, position.ecliptic()).id,
        };
        let ascendant = angle(AngleKey::Ascendant, asc);
        let midheaven = angle(AngleKey::Midheaven, mc);

        let snapshot = source.snapshot(&origin)?;
        let placement = Placement {
            zodiac,
            ayanamsa,
            ascendant: asc.ecliptic(),
            houses: &houses,
        };
        let celestial_bodies = process_bodies(&snapshot.bodies, &placement)?;
        let celestial_points =
            process_points(&snapshot.bodies, snapshot.lunar_orbit.as_ref(), &placement)?;
        debug!(
            "placed {} bodies and {} points",
            celestial_bodies.len(),
            celestial_points.len()
        );

        let entities: Vec<AspectEntity> = celestial_bodies
            .iter()
            .map(|b| AspectEntity {
                key: EntityKey::Body(b.key),
                longitude: b.position.ecliptic(),
            })
            .chain(celestial_points.iter().map(|p| AspectEntity {
                key: EntityKey::Point(p.key),
                longitude: p.position.ecliptic(),
            }))
            .chain([ascendant, midheaven].iter().map(|a| AspectEntity {
                key: EntityKey::Angle(a.key),
                longitude: a.position.ecliptic(),
            }))
            .collect();
        let aspects = AspectCalculator::new().compute(&entities, &settings.aspects);
        debug!("found {} aspects among {} entities", aspects.len(), entities.len());

        Ok(Self {
            origin,
            house_system: settings.house_system,
            zodiac,
            ayanamsa,
            language: settings.language,
            ascendant,
            midheaven,
            sun_sign,
            houses,
            zodiac_cusps,
            celestial_bodies,
            celestial_points,
            aspects,
        })
    }

    /// Validate raw options, then build the chart.
    pub fn from_config(
        origin: Origin,
        config: &HoroscopeConfig,
        source: &dyn EphemerisSource,
    ) -> Result<Self, HoroscopeError> {
        let settings = HoroscopeSettings::try_from(config)?;
        Self::new(origin, &settings, source)
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    pub fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    /// Sidereal offset in degrees, recorded even for tropical charts.
    pub fn ayanamsa(&self) -> f64 {
        self.ayanamsa
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn ascendant(&self) -> &Angle {
        &self.ascendant
    }

    pub fn midheaven(&self) -> &Angle {
        &self.midheaven
    }

    /// Calendar sun sign of the local birth date, independent of the ephemeris.
    pub fn sun_sign(&self) -> Sign {
        self.sun_sign
    }

    pub fn houses(&self) -> &[House; 12] {
        &self.houses
    }

    pub fn zodiac_cusps(&self) -> &[ZodiacCusp; 12] {
        &self.zodiac_cusps
    }

    pub fn angles(&self) -> [Angle; 2] {
        [self.ascendant, self.midheaven]
    }

    pub fn celestial_bodies(&self) -> &EntitySet<CelestialBody> {
        &self.celestial_bodies
    }

    pub fn celestial_points(&self) -> &EntitySet<CelestialPoint> {
        &self.celestial_points
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    /// House holding `longitude`, given in the chart zodiac.
    pub fn locate_house(&self, longitude: f64) -> &House {
        locate_house(&self.houses, longitude)
    }

    pub fn labels(&self) -> Labels {
        Labels::new(self.language)
    }
}
