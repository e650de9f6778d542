//! Turns raw cusp longitudes into [`House`] entities and places longitudes in them.

use crate::houses::types::House;
use crate::zodiac::{arc_forward, normalize_degrees, ChartPosition};

/// Build the twelve houses, ids 1..=12, with cusps expressed relative to `ascendant`.
pub fn assemble_houses(cusps: &[f64; 12], ascendant: f64) -> [House; 12] {
    std::array::from_fn(|i| House {
        id: (i + 1) as u8,
        cusp: ChartPosition::relative_to(cusps[i], ascendant),
    })
}

/// Arc from each cusp to the following one. House 12 wraps to house 1.
pub fn house_spans(houses: &[House; 12]) -> [f64; 12] {
    std::array::from_fn(|i| houses[i].span_to(&houses[(i + 1) % 12]))
}

/// The house whose `[cusp, next cusp)` interval contains `longitude`.
///
/// Measured as the smallest forward arc from a cusp to the longitude, so the
/// lookup is total for any cusp set and wraps at 360°. If two cusps coincide
/// the earlier house wins.
pub fn locate_house(houses: &[House; 12], longitude: f64) -> &House {
    let lon = normalize_degrees(longitude);
    let mut best = &houses[0];
    let mut best_arc = arc_forward(best.cusp.ecliptic(), lon);
    for house in &houses[1..] {
        let arc = arc_forward(house.cusp.ecliptic(), lon);
        if arc < best_arc {
            best = house;
            best_arc = arc;
        }
    }
    best
}
