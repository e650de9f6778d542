pub mod lunar;
pub mod source;
pub mod types;

pub use source::{EphemerisSource, FixedEphemeris};
pub use types::{EphemerisSnapshot, LunarOrbit, RawBodyRecord};
