//! Display labels for chart keys. Presentation metadata only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

pub const ALL_LANGUAGES: [Language; 2] = [Language::En, Language::Es];

impl Language {
    pub fn key(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_LANGUAGES
            .iter()
            .copied()
            .find(|l| l.key() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownLanguage {
                language: s.to_string(),
                valid: ALL_LANGUAGES.iter().map(|l| l.key().to_string()).collect(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// key, English, Spanish
const LABEL_ROWS: &[(&str, &str, &str)] = &[
    ("aries", "Aries", "Aries"),
    ("taurus", "Taurus", "Tauro"),
    ("gemini", "Gemini", "Géminis"),
    ("cancer", "Cancer", "Cáncer"),
    ("leo", "Leo", "Leo"),
    ("virgo", "Virgo", "Virgo"),
    ("libra", "Libra", "Libra"),
    ("scorpio", "Scorpio", "Escorpio"),
    ("sagittarius", "Sagittarius", "Sagitario"),
    ("capricorn", "Capricorn", "Capricornio"),
    ("aquarius", "Aquarius", "Acuario"),
    ("pisces", "Pisces", "Piscis"),
    ("sun", "Sun", "Sol"),
    ("moon", "Moon", "Luna"),
    ("mercury", "Mercury", "Mercurio"),
    ("venus", "Venus", "Venus"),
    ("mars", "Mars", "Marte"),
    ("jupiter", "Jupiter", "Júpiter"),
    ("saturn", "Saturn", "Saturno"),
    ("uranus", "Uranus", "Urano"),
    ("neptune", "Neptune", "Neptuno"),
    ("pluto", "Pluto", "Plutón"),
    ("chiron", "Chiron", "Quirón"),
    ("northnode", "North Node", "Nodo Norte"),
    ("southnode", "South Node", "Nodo Sur"),
    ("lilith", "Lilith", "Lilith"),
    ("ascendant", "Ascendant", "Ascendente"),
    ("midheaven", "Midheaven", "Medio Cielo"),
    ("conjunction", "Conjunction", "Conjunción"),
    ("opposition", "Opposition", "Oposición"),
    ("trine", "Trine", "Trígono"),
    ("square", "Square", "Cuadratura"),
    ("sextile", "Sextile", "Sextil"),
    ("quincunx", "Quincunx", "Quincuncio"),
    ("quintile", "Quintile", "Quintil"),
    ("septile", "Septile", "Septil"),
    ("semi-square", "Semi-square", "Semicuadratura"),
    ("semi-sextile", "Semi-sextile", "Semisextil"),
    ("placidus", "Placidus", "Placidus"),
    ("koch", "Koch", "Koch"),
    ("campanus", "Campanus", "Campanus"),
    ("whole-sign", "Whole Sign", "Signo Entero"),
    ("equal-house", "Equal House", "Casas Iguales"),
    ("regiomontanus", "Regiomontanus", "Regiomontanus"),
    ("topocentric", "Topocentric", "Topocéntrico"),
    ("tropical", "Tropical", "Tropical"),
    ("sidereal", "Sidereal", "Sideral"),
];

lazy_static::lazy_static! {
    static ref LABELS: HashMap<Language, HashMap<&'static str, &'static str>> = {
        let mut tables: HashMap<Language, HashMap<&'static str, &'static str>> = HashMap::new();
        for &(key, en, es) in LABEL_ROWS {
            tables.entry(Language::En).or_default().insert(key, en);
            tables.entry(Language::Es).or_default().insert(key, es);
        }
        tables
    };
}

/// Label of a chart key (`"sun"`, `"semi-square"`, `"whole-sign"`, ...) in `language`.
pub fn label_for(key: &str, language: Language) -> Option<&'static str> {
    LABELS.get(&language).and_then(|table| table.get(key).copied())
}

/// Label lookups bound to one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    language: Language,
}

impl Labels {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Label of `key`, falling back to the key itself.
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        label_for(key, self.language).unwrap_or(key)
    }
}
