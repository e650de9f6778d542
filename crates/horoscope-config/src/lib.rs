use anyhow::Context;
use horoscope::{GeoLocation, HoroscopeConfig, HoroscopeSettings};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no settings path is given.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["configs/horoscope.toml", "../../configs/horoscope.toml"];

/// Default observer from the `[location]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl LocationConfig {
    pub fn geo(&self) -> GeoLocation {
        GeoLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Contents of `horoscope.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub chart: HoroscopeConfig,
    #[serde(default)]
    pub location: Option<LocationConfig>,
}

impl FileConfig {
    /// Validated chart settings.
    pub fn settings(&self) -> anyhow::Result<HoroscopeSettings> {
        HoroscopeSettings::try_from(&self.chart).context("Invalid [chart] settings")
    }
}

/// Parse and validate settings text.
pub fn parse_config_toml(text: &str) -> anyhow::Result<FileConfig> {
    let config: FileConfig =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse horoscope.toml: {e}"))?;
    config.settings()?;
    Ok(config)
}

/// Read settings text from `path`, or from the first of [`CONFIG_SEARCH_PATHS`] that exists.
///
/// Returns `Ok(None)` when no path was given and nothing was found.
pub fn read_config_toml_text(path: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in CONFIG_SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Load settings. An explicit path must exist; without one the search paths
/// are tried and defaults are used when none exists.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FileConfig> {
    match read_config_toml_text(path)? {
        Some((found, text)) => {
            parse_config_toml(&text).with_context(|| format!("In settings file {}", found.display()))
        }
        None => Ok(FileConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horoscope::{HouseSystem, Zodiac};
    use std::io::Write;

    const SAMPLE: &str = r#"
[chart]
house_system = "koch"
zodiac = "sidereal"
ayanamsa = 24.0
aspect_points = ["bodies", "angles"]
aspect_with_points = ["bodies"]
aspect_types = ["major", "quincunx"]
language = "es"

[chart.custom_orbs]
conjunction = 10.0

[location]
latitude = 55.7558
longitude = 37.6176
utc_offset_minutes = 180
"#;

    #[test]
    fn parses_full_file() {
        let config = parse_config_toml(SAMPLE).unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.zodiac, Zodiac::Sidereal);
        assert_eq!(settings.ayanamsa, 24.0);
        assert_eq!(settings.aspects.types.len(), 6);
        let location = config.location.unwrap();
        assert_eq!(location.utc_offset_minutes, 180);
        assert_eq!(location.geo().latitude, 55.7558);
    }

    #[test]
    fn shipped_config_is_valid() {
        let config = parse_config_toml(include_str!("../../../configs/horoscope.toml")).unwrap();
        assert_eq!(config.settings().unwrap(), HoroscopeSettings::default());
        assert!(config.location.is_some());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config_toml("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.settings().unwrap(), HoroscopeSettings::default());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = parse_config_toml("[chart]\nhouse_system = \"porphyry\"\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid [chart] settings"), "{message}");
        assert!(message.contains("porphyry"), "{message}");

        assert!(parse_config_toml("[chart\n").is_err());
    }

    #[test]
    fn loads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.chart.house_system, "koch");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
