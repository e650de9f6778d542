pub mod coordinates;
pub mod types;

pub use coordinates::{
    angular_separation, apply_zodiac_offset, apply_zodiac_offset_with, arc_forward,
    normalize_degrees, sign_of, to_horizon_coordinate, DEFAULT_AYANAMSA,
};
pub use types::{ArcDegrees, ChartPosition, Sign, SignPosition, Zodiac, ALL_SIGNS};
