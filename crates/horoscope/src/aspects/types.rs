use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::chart::angles::AngleKey;
use crate::chart::bodies::{BodyKey, PointKey};
use crate::error::ConfigurationError;

/// Aspect types, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    Quintile,
    Septile,
    SemiSquare,
    SemiSextile,
}

pub const ALL_ASPECTS: [AspectType; 10] = [
    AspectType::Conjunction,
    AspectType::Opposition,
    AspectType::Trine,
    AspectType::Square,
    AspectType::Sextile,
    AspectType::Quincunx,
    AspectType::Quintile,
    AspectType::Septile,
    AspectType::SemiSquare,
    AspectType::SemiSextile,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectLevel {
    Major,
    Minor,
}

impl AspectLevel {
    pub fn key(self) -> &'static str {
        match self {
            AspectLevel::Major => "major",
            AspectLevel::Minor => "minor",
        }
    }

    /// Aspect types of this level, in table order.
    pub fn types(self) -> impl Iterator<Item = AspectType> {
        ALL_ASPECTS.into_iter().filter(move |t| t.level() == self)
    }
}

impl AspectType {
    pub const fn all() -> &'static [AspectType; 10] {
        &ALL_ASPECTS
    }

    pub fn key(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Opposition => "opposition",
            AspectType::Trine => "trine",
            AspectType::Square => "square",
            AspectType::Sextile => "sextile",
            AspectType::Quincunx => "quincunx",
            AspectType::Quintile => "quintile",
            AspectType::Septile => "septile",
            AspectType::SemiSquare => "semi-square",
            AspectType::SemiSextile => "semi-sextile",
        }
    }

    /// Nominal angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Trine => 120.0,
            AspectType::Square => 90.0,
            AspectType::Sextile => 60.0,
            AspectType::Quincunx => 150.0,
            AspectType::Quintile => 72.0,
            AspectType::Septile => 360.0 / 7.0,
            AspectType::SemiSquare => 45.0,
            AspectType::SemiSextile => 30.0,
        }
    }

    /// Orb used when no custom orb is configured.
    pub fn default_orb(self) -> f64 {
        match self {
            AspectType::Conjunction | AspectType::Opposition | AspectType::Trine => 8.0,
            AspectType::Square => 7.0,
            AspectType::Sextile => 6.0,
            AspectType::Quincunx => 5.0,
            AspectType::Quintile | AspectType::SemiSquare => 1.5,
            AspectType::Septile | AspectType::SemiSextile => 1.0,
        }
    }

    pub fn level(self) -> AspectLevel {
        match self {
            AspectType::Conjunction
            | AspectType::Opposition
            | AspectType::Trine
            | AspectType::Square
            | AspectType::Sextile => AspectLevel::Major,
            _ => AspectLevel::Minor,
        }
    }
}

impl FromStr for AspectType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_ASPECTS
            .iter()
            .copied()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownAspectType {
                aspect: s.to_string(),
                valid: ALL_ASPECTS.iter().map(|t| t.key().to_string()).collect(),
            })
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which kind of chart entity takes part in an aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Bodies,
    Points,
    Angles,
}

pub const ALL_CATEGORIES: [EntityCategory; 3] = [
    EntityCategory::Bodies,
    EntityCategory::Points,
    EntityCategory::Angles,
];

impl EntityCategory {
    pub fn key(self) -> &'static str {
        match self {
            EntityCategory::Bodies => "bodies",
            EntityCategory::Points => "points",
            EntityCategory::Angles => "angles",
        }
    }
}

impl FromStr for EntityCategory {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownAspectCategory {
                category: s.to_string(),
                valid: ALL_CATEGORIES.iter().map(|c| c.key().to_string()).collect(),
            })
    }
}

/// Key of any entity that can be aspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Body(BodyKey),
    Point(PointKey),
    Angle(AngleKey),
}

impl EntityKey {
    pub fn category(self) -> EntityCategory {
        match self {
            EntityKey::Body(_) => EntityCategory::Bodies,
            EntityKey::Point(_) => EntityCategory::Points,
            EntityKey::Angle(_) => EntityCategory::Angles,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            EntityKey::Body(k) => k.key(),
            EntityKey::Point(k) => k.key(),
            EntityKey::Angle(k) => k.key(),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for EntityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// An entity as seen by the aspect engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectEntity {
    pub key: EntityKey,
    pub longitude: f64,
}

/// A detected aspect between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub point1: EntityKey,
    pub point2: EntityKey,
    pub aspect: AspectType,
    pub level: AspectLevel,
    /// Shortest angular distance, [0, 180].
    pub separation: f64,
    /// `separation - angle`, signed.
    pub deviation: f64,
    /// Tolerance that applied to this aspect type.
    pub orb: f64,
}

/// Validated aspect filters and orbs.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSettings {
    /// Categories acting as aspect sources.
    pub points: Vec<EntityCategory>,
    /// Categories acting as aspect targets.
    pub with_points: Vec<EntityCategory>,
    /// Allowed types, in table order.
    pub types: Vec<AspectType>,
    pub custom_orbs: HashMap<AspectType, f64>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            points: ALL_CATEGORIES.to_vec(),
            with_points: ALL_CATEGORIES.to_vec(),
            types: ALL_ASPECTS.to_vec(),
            custom_orbs: HashMap::new(),
        }
    }
}

impl AspectSettings {
    /// Build settings from string filters.
    ///
    /// `types` accepts level names (`major`, `minor`) and individual aspect
    /// keys; duplicates collapse. Custom orbs must be finite and within [0, 180].
    pub fn from_filters<S: AsRef<str>>(
        points: &[S],
        with_points: &[S],
        types: &[S],
        custom_orbs: &HashMap<String, f64>,
    ) -> Result<Self, ConfigurationError> {
        let points = parse_categories(points)?;
        let with_points = parse_categories(with_points)?;

        let mut allowed = Vec::new();
        for name in types {
            let name = name.as_ref();
            match name.trim().to_lowercase().as_str() {
                "major" => allowed.extend(AspectLevel::Major.types()),
                "minor" => allowed.extend(AspectLevel::Minor.types()),
                _ => allowed.push(name.parse::<AspectType>().map_err(|_| {
                    ConfigurationError::UnknownAspectType {
                        aspect: name.to_string(),
                        valid: [AspectLevel::Major.key(), AspectLevel::Minor.key()]
                            .into_iter()
                            .chain(ALL_ASPECTS.iter().map(|t| t.key()))
                            .map(str::to_string)
                            .collect(),
                    }
                })?),
            }
        }
        allowed.sort();
        allowed.dedup();

        let mut orbs = HashMap::with_capacity(custom_orbs.len());
        for (name, &orb) in custom_orbs {
            let aspect = name.parse::<AspectType>()?;
            check_orb(aspect, orb)?;
            orbs.insert(aspect, orb);
        }

        Ok(Self {
            points,
            with_points,
            types: allowed,
            custom_orbs: orbs,
        })
    }

    /// Re-check custom orbs on settings assembled by hand.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (&aspect, &orb) in &self.custom_orbs {
            check_orb(aspect, orb)?;
        }
        Ok(())
    }

    /// Tolerance for `aspect`: the custom orb when configured, else the default.
    pub fn orb_for(&self, aspect: AspectType) -> f64 {
        self.custom_orbs
            .get(&aspect)
            .copied()
            .unwrap_or_else(|| aspect.default_orb())
    }

    /// Whether an unordered pair of categories passes the source/target filters.
    pub fn pairs(&self, a: EntityCategory, b: EntityCategory) -> bool {
        (self.points.contains(&a) && self.with_points.contains(&b))
            || (self.points.contains(&b) && self.with_points.contains(&a))
    }
}

fn check_orb(aspect: AspectType, orb: f64) -> Result<(), ConfigurationError> {
    if !orb.is_finite() || !(0.0..=180.0).contains(&orb) {
        return Err(ConfigurationError::InvalidOrb {
            aspect: aspect.key().to_string(),
            orb,
        });
    }
    Ok(())
}

fn parse_categories<S: AsRef<str>>(names: &[S]) -> Result<Vec<EntityCategory>, ConfigurationError> {
    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        let category = name.as_ref().parse::<EntityCategory>()?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Ok(categories)
}
