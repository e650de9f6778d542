use crate::aspects::types::{Aspect, AspectEntity, AspectSettings, AspectType};
use crate::zodiac::angular_separation;

/// Pairwise aspect detection over positioned chart entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Nearest allowed aspect type for a separation.
    ///
    /// Returns the type and signed deviation. A type matches when
    /// `|separation - angle| <= orb`; among matches the smallest absolute
    /// deviation wins, and on an exact tie the type listed first.
    pub fn match_separation(
        &self,
        separation: f64,
        settings: &AspectSettings,
    ) -> Option<(AspectType, f64)> {
        let mut best: Option<(AspectType, f64)> = None;
        for &aspect in &settings.types {
            let deviation = separation - aspect.angle();
            if deviation.abs() > settings.orb_for(aspect) {
                continue;
            }
            match best {
                Some((_, d)) if d.abs() <= deviation.abs() => {}
                _ => best = Some((aspect, deviation)),
            }
        }
        best
    }

    /// Aspect between two entities, if any. Order independent apart from
    /// which entity is reported as `point1`.
    pub fn aspect_between(
        &self,
        a: &AspectEntity,
        b: &AspectEntity,
        settings: &AspectSettings,
    ) -> Option<Aspect> {
        let separation = angular_separation(a.longitude, b.longitude);
        let (aspect, deviation) = self.match_separation(separation, settings)?;
        Some(Aspect {
            point1: a.key,
            point2: b.key,
            aspect,
            level: aspect.level(),
            separation,
            deviation,
            orb: settings.orb_for(aspect),
        })
    }

    /// Every aspect among `entities` passing the category filters.
    ///
    /// Each unordered pair is visited once, in list order; self pairs never occur.
    pub fn compute(&self, entities: &[AspectEntity], settings: &AspectSettings) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                let (a, b) = (&entities[i], &entities[j]);
                if a.key == b.key || !settings.pairs(a.key.category(), b.key.category()) {
                    continue;
                }
                if let Some(aspect) = self.aspect_between(a, b, settings) {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }
}
