//! Chart configuration: raw string form and its validated counterpart.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::aspects::AspectSettings;
use crate::error::ConfigurationError;
use crate::houses::HouseSystem;
use crate::labels::Language;
use crate::zodiac::{Zodiac, DEFAULT_AYANAMSA};

/// Chart options as they arrive from a settings file or a request.
///
/// Field names are snake_case; the camelCase spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoroscopeConfig {
    #[serde(alias = "houseSystem")]
    pub house_system: String,
    pub zodiac: String,
    /// Sidereal offset in degrees; `None` uses [`DEFAULT_AYANAMSA`].
    pub ayanamsa: Option<f64>,
    #[serde(alias = "aspectPoints")]
    pub aspect_points: Vec<String>,
    #[serde(alias = "aspectWithPoints")]
    pub aspect_with_points: Vec<String>,
    #[serde(alias = "aspectTypes")]
    pub aspect_types: Vec<String>,
    #[serde(alias = "customOrbs")]
    pub custom_orbs: HashMap<String, f64>,
    pub language: String,
}

impl Default for HoroscopeConfig {
    fn default() -> Self {
        let categories = vec!["bodies".to_string(), "points".to_string(), "angles".to_string()];
        Self {
            house_system: HouseSystem::default().key().to_string(),
            zodiac: Zodiac::default().key().to_string(),
            ayanamsa: None,
            aspect_points: categories.clone(),
            aspect_with_points: categories,
            aspect_types: vec!["major".to_string(), "minor".to_string()],
            custom_orbs: HashMap::new(),
            language: Language::default().key().to_string(),
        }
    }
}

/// Validated chart options.
#[derive(Debug, Clone, PartialEq)]
pub struct HoroscopeSettings {
    pub house_system: HouseSystem,
    pub zodiac: Zodiac,
    pub ayanamsa: f64,
    pub aspects: AspectSettings,
    pub language: Language,
}

impl Default for HoroscopeSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            zodiac: Zodiac::default(),
            ayanamsa: DEFAULT_AYANAMSA,
            aspects: AspectSettings::default(),
            language: Language::default(),
        }
    }
}

impl HoroscopeSettings {
    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }

    pub fn with_zodiac(mut self, zodiac: Zodiac) -> Self {
        self.zodiac = zodiac;
        self
    }

    /// Check the numeric fields, which are public and may be set directly.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_ayanamsa(self.ayanamsa)?;
        self.aspects.validate()
    }
}

fn check_ayanamsa(ayanamsa: f64) -> Result<(), ConfigurationError> {
    if !ayanamsa.is_finite() {
        return Err(ConfigurationError::InvalidAyanamsa { ayanamsa });
    }
    Ok(())
}

impl TryFrom<&HoroscopeConfig> for HoroscopeSettings {
    type Error = ConfigurationError;

    fn try_from(config: &HoroscopeConfig) -> Result<Self, Self::Error> {
        let ayanamsa = config.ayanamsa.unwrap_or(DEFAULT_AYANAMSA);
        check_ayanamsa(ayanamsa)?;
        Ok(Self {
            house_system: config.house_system.parse()?,
            zodiac: config.zodiac.parse()?,
            ayanamsa,
            aspects: AspectSettings::from_filters(
                config.aspect_points.as_slice(),
                config.aspect_with_points.as_slice(),
                config.aspect_types.as_slice(),
                &config.custom_orbs,
            )?,
            language: config.language.parse()?,
        })
    }
}

impl TryFrom<HoroscopeConfig> for HoroscopeSettings {
    type Error = ConfigurationError;

    fn try_from(config: HoroscopeConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates_to_default_settings() {
        let settings = HoroscopeSettings::try_from(&HoroscopeConfig::default()).unwrap();
        assert_eq!(settings, HoroscopeSettings::default());
    }

    #[test]
    fn camel_case_json_is_accepted() {
        let json = r#"{
            "houseSystem": "koch",
            "zodiac": "sidereal",
            "aspectTypes": ["major"],
            "customOrbs": {"trine": 6.5}
        }"#;
        let config: HoroscopeConfig = serde_json::from_str(json).unwrap();
        let settings = HoroscopeSettings::try_from(config).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.zodiac, Zodiac::Sidereal);
        assert_eq!(settings.aspects.types.len(), 5);
        assert_eq!(settings.aspects.orb_for(crate::aspects::AspectType::Trine), 6.5);
        assert_eq!(settings.ayanamsa, DEFAULT_AYANAMSA);
    }

    #[test]
    fn each_field_is_validated() {
        let bad_system = HoroscopeConfig {
            house_system: "porphyry".into(),
            ..HoroscopeConfig::default()
        };
        assert!(matches!(
            HoroscopeSettings::try_from(&bad_system),
            Err(ConfigurationError::UnknownHouseSystem { .. })
        ));

        let bad_zodiac = HoroscopeConfig {
            zodiac: "draconic".into(),
            ..HoroscopeConfig::default()
        };
        assert!(matches!(
            HoroscopeSettings::try_from(&bad_zodiac),
            Err(ConfigurationError::UnknownZodiac { .. })
        ));

        let bad_ayanamsa = HoroscopeConfig {
            ayanamsa: Some(f64::INFINITY),
            ..HoroscopeConfig::default()
        };
        assert!(matches!(
            HoroscopeSettings::try_from(&bad_ayanamsa),
            Err(ConfigurationError::InvalidAyanamsa { .. })
        ));
    }

    #[test]
    fn hand_built_settings_are_checked() {
        assert!(HoroscopeSettings::default().validate().is_ok());

        let settings = HoroscopeSettings {
            ayanamsa: f64::NAN,
            ..HoroscopeSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidAyanamsa { .. })
        ));

        let mut settings = HoroscopeSettings::default();
        settings
            .aspects
            .custom_orbs
            .insert(crate::aspects::AspectType::Trine, 500.0);
        match settings.validate() {
            Err(ConfigurationError::InvalidOrb { aspect, orb }) => {
                assert_eq!(aspect, "trine");
                assert_eq!(orb, 500.0);
            }
            other => panic!("expected InvalidOrb, got {other:?}"),
        }
    }
}
