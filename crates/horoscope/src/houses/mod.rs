pub mod assembler;
pub mod calculator;
pub mod types;

pub use assembler::{assemble_houses, house_spans, locate_house};
pub use calculator::{
    Campanus, EqualHouse, HouseCuspCalculator, Koch, Placidus, Regiomontanus, Topocentric,
    WholeSign,
};
pub use types::{House, HouseInput, HouseSystem, ALL_HOUSE_SYSTEMS};
