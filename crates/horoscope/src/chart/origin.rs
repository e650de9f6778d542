//! Observer moment and place.
//!
//! Sources:
//! - Julian date from Unix time: JD = t / 86400 + 2440587.5.
//! - GMST polynomial: Meeus, Astronomical Algorithms, eq. 12.4.
//! - Mean obliquity: Meeus eq. 22.2 (IAU 1980 coefficients).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OriginError;
use crate::zodiac::normalize_degrees;

/// Julian date of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Geographic location in degrees, east longitude positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Local civil calendar components. `month` is 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
}

/// Immutable observer origin with its derived astronomical quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    local: NaiveDateTime,
    utc_offset_minutes: i32,
    utc: DateTime<Utc>,
    location: GeoLocation,
    julian_day: f64,
    julian_centuries: f64,
    obliquity: f64,
    local_sidereal_time: f64,
}

impl Origin {
    /// Validate the moment and place and derive sidereal time and obliquity.
    pub fn new(
        moment: LocalMoment,
        utc_offset_minutes: i32,
        location: GeoLocation,
    ) -> Result<Self, OriginError> {
        let date = NaiveDate::from_ymd_opt(moment.year, moment.month, moment.day).ok_or(
            OriginError::InvalidDate {
                year: moment.year,
                month: moment.month,
                day: moment.day,
            },
        )?;
        let time = NaiveTime::from_hms_opt(moment.hour, moment.minute, moment.second).ok_or(
            OriginError::InvalidTime {
                hour: moment.hour,
                minute: moment.minute,
                second: moment.second,
            },
        )?;
        Self::from_naive(date.and_time(time), utc_offset_minutes, location)
    }

    /// Same as [`Origin::new`] for an already parsed local date-time.
    pub fn from_naive(
        local: NaiveDateTime,
        utc_offset_minutes: i32,
        location: GeoLocation,
    ) -> Result<Self, OriginError> {
        if !location.latitude.is_finite() || location.latitude.abs() > 90.0 {
            return Err(OriginError::InvalidLatitude {
                latitude: location.latitude,
            });
        }
        if !location.longitude.is_finite() || location.longitude.abs() > 180.0 {
            return Err(OriginError::InvalidLongitude {
                longitude: location.longitude,
            });
        }
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(OriginError::InvalidUtcOffset {
                minutes: utc_offset_minutes,
            })?;
        let utc = offset
            .from_local_datetime(&local)
            .single()
            .ok_or(OriginError::InvalidUtcOffset {
                minutes: utc_offset_minutes,
            })?
            .with_timezone(&Utc);

        let julian_day = julian_day(&utc);
        let julian_centuries = (julian_day - J2000_JD) / DAYS_PER_CENTURY;

        Ok(Self {
            local,
            utc_offset_minutes,
            utc,
            location,
            julian_day,
            julian_centuries,
            obliquity: mean_obliquity(julian_centuries),
            local_sidereal_time: normalize_degrees(
                greenwich_mean_sidereal_time(julian_day) + location.longitude,
            ),
        })
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.location.longitude
    }

    pub fn julian_day(&self) -> f64 {
        self.julian_day
    }

    /// Julian centuries since J2000.0.
    pub fn julian_centuries(&self) -> f64 {
        self.julian_centuries
    }

    /// Mean obliquity of the ecliptic, degrees.
    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }

    /// Local mean sidereal time in degrees; equals the RAMC.
    pub fn local_sidereal_time(&self) -> f64 {
        self.local_sidereal_time
    }
}

/// Julian date (UT) of a UTC instant.
pub fn julian_day(utc: &DateTime<Utc>) -> f64 {
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn greenwich_mean_sidereal_time(julian_day: f64) -> f64 {
    let d = julian_day - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Mean obliquity of the ecliptic in degrees for `t` Julian centuries since J2000.
pub fn mean_obliquity(t: f64) -> f64 {
    23.439_291_111 - 0.013_004_166_667 * t - 1.638_889e-7 * t * t + 5.036_111e-7 * t * t * t
}
