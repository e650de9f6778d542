//! Error types for chart construction.
//!
//! Every failure is local to one chart: configuration problems are caught
//! before any computation starts, geometry and input problems abort the
//! construction without exposing a partial chart.

use thiserror::Error;

use crate::houses::HouseSystem;

/// Invalid settings. Raised before any computation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    UnknownHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid zodiac: {zodiac}. Valid zodiacs: {valid:?}")]
    UnknownZodiac { zodiac: String, valid: Vec<String> },
    #[error("Invalid aspect category: {category}. Valid categories: {valid:?}")]
    UnknownAspectCategory { category: String, valid: Vec<String> },
    #[error("Invalid aspect type or level: {aspect}. Valid values: {valid:?}")]
    UnknownAspectType { aspect: String, valid: Vec<String> },
    #[error("Invalid orb {orb} for {aspect}: must be a finite value in [0, 180]")]
    InvalidOrb { aspect: String, orb: f64 },
    #[error("Invalid ayanamsa {ayanamsa}: must be finite")]
    InvalidAyanamsa { ayanamsa: f64 },
    #[error("Invalid language: {language}. Valid languages: {valid:?}")]
    UnknownLanguage { language: String, valid: Vec<String> },
}

/// A quadrant house system has no real solution for the observer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseCalculationError {
    #[error(
        "{system} houses are undefined at latitude {latitude}: the ecliptic is circumpolar beyond {limit:.4}"
    )]
    Circumpolar {
        system: HouseSystem,
        latitude: f64,
        limit: f64,
    },
    #[error("{system} cusp {cusp} has no real solution at latitude {latitude}")]
    NonFinite {
        system: HouseSystem,
        cusp: usize,
        latitude: f64,
    },
    #[error("{system} cusps cross each other at latitude {latitude}: they wind {turns:.0} times around the ecliptic")]
    Unordered {
        system: HouseSystem,
        latitude: f64,
        turns: f64,
    },
    #[error("{system} cusp {cusp} did not converge at latitude {latitude}")]
    NoConvergence {
        system: HouseSystem,
        cusp: usize,
        latitude: f64,
    },
}

/// Missing or malformed raw ephemeris data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputDataError {
    #[error("Ephemeris snapshot has no moon record; lunar points depend on it")]
    MissingMoon,
    #[error("Ephemeris snapshot has no lunar orbit elements (mean node, mean apogee)")]
    MissingLunarOrbit,
    #[error("Ephemeris record {key} has a non-finite longitude: {value}")]
    NonFiniteLongitude { key: String, value: f64 },
    #[error("Ephemeris record {key} appears more than once")]
    DuplicateRecord { key: String },
}

/// Invalid observer moment or place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OriginError {
    #[error("Invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
    #[error("Invalid UTC offset: {minutes} minutes")]
    InvalidUtcOffset { minutes: i32 },
    #[error("Latitude {latitude} outside [-90, 90]")]
    InvalidLatitude { latitude: f64 },
    #[error("Longitude {longitude} outside [-180, 180]")]
    InvalidLongitude { longitude: f64 },
}

/// Umbrella error for chart construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoroscopeError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("House calculation failed: {0}")]
    HouseCalculation(#[from] HouseCalculationError),
    #[error("Input data error: {0}")]
    InputData(#[from] InputDataError),
    #[error("Invalid origin: {0}")]
    Origin(#[from] OriginError),
}

/// Alternative name used by callers that think in terms of chart geometry.
pub type GeometryError = HouseCalculationError;
