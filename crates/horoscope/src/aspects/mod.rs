pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{
    Aspect, AspectEntity, AspectLevel, AspectSettings, AspectType, EntityCategory, EntityKey,
    ALL_ASPECTS, ALL_CATEGORIES,
};
