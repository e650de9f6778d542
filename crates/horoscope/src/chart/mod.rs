pub mod angles;
pub mod bodies;
pub mod horoscope;
pub mod origin;
pub mod settings;

pub use angles::{Angle, AngleKey, ALL_ANGLES};
pub use bodies::{BodyKey, CelestialBody, CelestialPoint, PointKey, ALL_BODIES, ALL_POINTS};
pub use horoscope::{Horoscope, ZodiacCusp};
pub use origin::{GeoLocation, LocalMoment, Origin};
pub use settings::{HoroscopeConfig, HoroscopeSettings};
