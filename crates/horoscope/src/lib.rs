//! Natal chart computation: angles, house cusps for seven house systems,
//! sign placement in tropical or sidereal zodiacs, lunar points and aspects.
//!
//! Body positions come from an injected [`EphemerisSource`]; the crate does
//! not compute planetary ephemerides itself.

pub mod aspects;
pub mod chart;
pub mod collection;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod labels;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectLevel, AspectSettings, AspectType, EntityKey};
pub use chart::{
    Angle, AngleKey, BodyKey, CelestialBody, CelestialPoint, GeoLocation, Horoscope,
    HoroscopeConfig, HoroscopeSettings, LocalMoment, Origin, PointKey, ZodiacCusp,
};
pub use collection::EntitySet;
pub use ephemeris::{EphemerisSnapshot, EphemerisSource, FixedEphemeris, LunarOrbit, RawBodyRecord};
pub use error::{
    ConfigurationError, GeometryError, HoroscopeError, HouseCalculationError, InputDataError,
    OriginError,
};
pub use houses::{House, HouseCuspCalculator, HouseInput, HouseSystem};
pub use labels::{label_for, Labels, Language};
pub use zodiac::{ChartPosition, Sign, Zodiac};
