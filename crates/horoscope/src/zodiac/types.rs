use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::zodiac::coordinates::{normalize_degrees, sign_of, to_horizon_coordinate};

/// Zodiac reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    #[default]
    Tropical,
    Sidereal,
}

const ZODIACS: &[(&str, Zodiac)] = &[("tropical", Zodiac::Tropical), ("sidereal", Zodiac::Sidereal)];

impl Zodiac {
    pub fn key(self) -> &'static str {
        match self {
            Zodiac::Tropical => "tropical",
            Zodiac::Sidereal => "sidereal",
        }
    }
}

impl FromStr for Zodiac {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ZODIACS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, zodiac)| *zodiac)
            .ok_or_else(|| ConfigurationError::UnknownZodiac {
                zodiac: s.to_string(),
                valid: ZODIACS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The twelve zodiac signs in ecliptic order, starting at 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// Notional tropical sun-sign dates, `((start_month, start_day), (end_month, end_day))`,
/// inclusive on both ends. Indexed like [`ALL_SIGNS`].
const TROPICAL_DATES: [((u32, u32), (u32, u32)); 12] = [
    ((3, 21), (4, 19)),
    ((4, 20), (5, 20)),
    ((5, 21), (6, 20)),
    ((6, 21), (7, 22)),
    ((7, 23), (8, 22)),
    ((8, 23), (9, 22)),
    ((9, 23), (10, 22)),
    ((10, 23), (11, 21)),
    ((11, 22), (12, 21)),
    ((12, 22), (1, 19)),
    ((1, 20), (2, 18)),
    ((2, 19), (3, 20)),
];

impl Sign {
    pub const fn all() -> &'static [Sign; 12] {
        &ALL_SIGNS
    }

    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: usize) -> Sign {
        ALL_SIGNS[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Sign::Aries => "aries",
            Sign::Taurus => "taurus",
            Sign::Gemini => "gemini",
            Sign::Cancer => "cancer",
            Sign::Leo => "leo",
            Sign::Virgo => "virgo",
            Sign::Libra => "libra",
            Sign::Scorpio => "scorpio",
            Sign::Sagittarius => "sagittarius",
            Sign::Capricorn => "capricorn",
            Sign::Aquarius => "aquarius",
            Sign::Pisces => "pisces",
        }
    }

    /// Ecliptic longitude where the sign begins.
    pub fn start_degrees(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn tropical_start_date(self) -> (u32, u32) {
        TROPICAL_DATES[self.index()].0
    }

    pub fn tropical_end_date(self) -> (u32, u32) {
        TROPICAL_DATES[self.index()].1
    }

    /// Calendar-driven sun sign for a month (1-12) and day of month.
    pub fn from_calendar_date(month: u32, day: u32) -> Sign {
        let key = month * 100 + day;
        ALL_SIGNS
            .iter()
            .copied()
            .find(|sign| {
                let ((sm, sd), (em, ed)) = TROPICAL_DATES[sign.index()];
                let (start, end) = (sm * 100 + sd, em * 100 + ed);
                if start <= end {
                    key >= start && key <= end
                } else {
                    // Capricorn runs across the new year
                    key >= start || key <= end
                }
            })
            .unwrap_or(Sign::Capricorn)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sign membership of an ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPosition {
    pub sign: Sign,
    pub index: usize,
    pub degrees_in_sign: f64,
}

/// Sexagesimal rendering of a decimal degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArcDegrees {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ArcDegrees {
    /// Truncates to whole arc seconds. Negative input is normalized first.
    ///
    /// Products like `1.15 * 3600` land a hair under the integer, so a
    /// sub-microsecond slack is added before truncating.
    pub fn from_decimal(value: f64) -> Self {
        Self::from_seconds(whole_seconds(value))
    }

    /// Like [`from_decimal`](Self::from_decimal), but never reaches `limit`
    /// degrees: a longitude shows at most 359° 59' 59'', a degree within a
    /// sign at most 29° 59' 59''.
    pub fn from_decimal_below(value: f64, limit: u32) -> Self {
        let cap = u64::from(limit) * 3600;
        Self::from_seconds(whole_seconds(value).min(cap.saturating_sub(1)))
    }

    fn from_seconds(total_seconds: u64) -> Self {
        Self {
            degrees: (total_seconds / 3600) as u32,
            minutes: ((total_seconds % 3600) / 60) as u32,
            seconds: (total_seconds % 60) as u32,
        }
    }
}

fn whole_seconds(value: f64) -> u64 {
    let value = if value < 0.0 { normalize_degrees(value) } else { value };
    (value * 3600.0 + 1e-7).floor() as u64
}

impl fmt::Display for ArcDegrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° {:02}' {:02}''", self.degrees, self.minutes, self.seconds)
    }
}

/// A position in both chart frames: zodiac-relative ecliptic longitude and
/// ascendant-relative horizon longitude. Both are always in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPosition {
    ecliptic: f64,
    horizon: f64,
}

impl ChartPosition {
    pub fn new(ecliptic: f64, horizon: f64) -> Self {
        Self {
            ecliptic: normalize_degrees(ecliptic),
            horizon: normalize_degrees(horizon),
        }
    }

    /// Position of `ecliptic`, with the horizon frame anchored at `ascendant`.
    pub fn relative_to(ecliptic: f64, ascendant: f64) -> Self {
        Self::new(ecliptic, to_horizon_coordinate(ascendant, ecliptic))
    }

    pub fn ecliptic(&self) -> f64 {
        self.ecliptic
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn sign_position(&self) -> SignPosition {
        sign_of(self.ecliptic)
    }

    pub fn arc_degrees(&self) -> ArcDegrees {
        ArcDegrees::from_decimal_below(self.ecliptic, 360)
    }

    pub fn arc_degrees_in_sign(&self) -> ArcDegrees {
        ArcDegrees::from_decimal_below(self.sign_position().degrees_in_sign, 30)
    }
}
